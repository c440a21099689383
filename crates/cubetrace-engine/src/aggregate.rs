use crate::discover::worker_logs;
use crate::error::{Error, Result};
use crate::reconstruct::reconstruct_log;
use cubetrace_types::{GeneratorRecord, SolverRecord};
use std::path::{Path, PathBuf};

/// A worker log that failed to reconstruct, with the error that stopped it.
#[derive(Debug)]
pub struct SkippedLog {
    pub path: PathBuf,
    pub error: Error,
}

/// Concatenated reconstruction of every worker log in a job directory.
#[derive(Debug, Default)]
pub struct JobTrace {
    pub generators: Vec<GeneratorRecord>,
    pub solvers: Vec<SolverRecord>,
    pub skipped: Vec<SkippedLog>,
}

/// Reconstructs every worker log under `job_dir`, in discovery order.
///
/// A log that fails to parse or violates the protocol lands in `skipped`
/// and does not stop the others.
pub fn reconstruct_job_dir(job_dir: &Path) -> Result<JobTrace> {
    let mut trace = JobTrace::default();
    for log in worker_logs(job_dir)? {
        match reconstruct_log(&log) {
            Ok(mut file) => {
                trace.generators.append(&mut file.generators);
                trace.solvers.append(&mut file.solvers);
            }
            Err(error) => trace.skipped.push(SkippedLog {
                path: log.path,
                error,
            }),
        }
    }
    Ok(trace)
}
