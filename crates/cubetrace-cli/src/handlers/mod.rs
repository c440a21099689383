pub mod baseline;
pub mod jobs;
pub mod memory;
pub mod threads;
