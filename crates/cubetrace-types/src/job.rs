use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome reported for a job by the client node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobResult {
    /// Never resolved, or timed out.
    #[default]
    Unknown,
    Sat,
    Unsat,
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobResult::Unknown => write!(f, "UNKNOWN"),
            JobResult::Sat => write!(f, "SAT"),
            JobResult::Unsat => write!(f, "UNSAT"),
        }
    }
}

/// Lifecycle of one job across the whole run.
///
/// Introduction, resolution and timeout come from the client node's log;
/// cube generation details come from the worker log of the node that ran
/// the generator. Optional fields stay unset when the corresponding line
/// never appeared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Job id assigned by the client.
    pub id: u32,
    /// When the client introduced the job.
    pub start_time: f64,
    /// When the client saw a solution or timeout.
    pub end_time: Option<f64>,
    /// end_time - start_time.
    pub duration: Option<f64>,
    /// SAT/UNSAT verdict, Unknown on timeout or truncation.
    pub result: JobResult,
    /// When cube generation started on the root node.
    pub generation_start: Option<f64>,
    /// When cube generation finished on the root node.
    pub generation_end: Option<f64>,
    /// Dynamic cubes created across all workers of this job.
    pub cube_count: u32,
    /// generation_end - generation_start, when both were seen.
    pub generation_duration: Option<f64>,
    /// Rank of the worker that ran cube generation.
    pub root_node: Option<u32>,
    /// Cubes shipped from workers to other nodes.
    pub sent_cubes: u32,
    /// Failed cubes shipped back.
    pub returned_failed_cubes: u32,
    /// Smallest reported size of a cube actually used.
    pub used_cube_size: Option<u32>,
    /// Smallest reported failed-assumption buffer size.
    pub failed_assumption_buffer: Option<u32>,
}

impl JobRecord {
    /// A job known only from its introduction line.
    pub fn introduced(id: u32, start_time: f64) -> Self {
        JobRecord {
            id,
            start_time,
            end_time: None,
            duration: None,
            result: JobResult::Unknown,
            generation_start: None,
            generation_end: None,
            cube_count: 0,
            generation_duration: None,
            root_node: None,
            sent_cubes: 0,
            returned_failed_cubes: 0,
            used_cube_size: None,
            failed_assumption_buffer: None,
        }
    }
}
