// Engine module - Core reconstruction logic (classification, tracking, extraction)
// This layer sits between raw worker logs and CLI presentation

pub mod aggregate;
pub mod baseline;
pub mod classify;
pub mod discover;
pub mod error;
pub mod interval;
pub mod jobs;
pub mod memory;
pub mod reconstruct;
pub mod tracker;

pub use aggregate::{JobTrace, SkippedLog, reconstruct_job_dir};
pub use baseline::parse_baseline;
pub use classify::{BadNumber, classify};
pub use discover::{WorkerLog, worker_logs};
pub use error::{Error, Result};
pub use interval::{Activity, Interval};
pub use jobs::extract_jobs;
pub use memory::extract_memory;
pub use reconstruct::{FileTrace, reconstruct_log};
pub use tracker::{InstanceTotals, OpenInterval, ThreadTracker, Violation};
