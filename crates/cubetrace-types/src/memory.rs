use serde::{Deserialize, Serialize};

/// One accumulated-memory reading from a worker log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemorySample {
    /// Seconds since solver start.
    pub at: f64,
    /// Accumulated memory in gigabytes, as reported by the process.
    pub gigabytes: f64,
}
