//! Testing infrastructure for cubetrace integration tests.
//!
//! This crate provides utilities for writing integration tests:
//! - `JobDir`: Isolated on-disk job directory populated with synthetic logs
//! - `lines`: Builders for protocol-shaped log lines

pub mod jobdir;
pub mod lines;

pub use jobdir::JobDir;
