use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Trailing rank#job pair of a worker log file name.
/// Example: "log.1#9" -> rank 1, job 9
static LOG_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)#(\d+)$").unwrap());

/// One worker process log inside a job directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerLog {
    pub path: PathBuf,
    /// MPI rank of the worker, from the file name.
    pub rank: u32,
    /// Job id, from the file name.
    pub job: u32,
}

/// Finds all worker logs under `job_dir`.
///
/// Worker logs sit one directory below the job directory (one subdirectory
/// per node) and are named `log*<rank>#<job>`. Names whose rank or job does
/// not fit a u32 are not worker logs. Results are ordered by path so reruns
/// see the same sequence.
pub fn worker_logs(job_dir: &Path) -> Result<Vec<WorkerLog>> {
    let mut logs = Vec::new();
    for entry in WalkDir::new(job_dir).min_depth(2).max_depth(2) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.starts_with("log") {
            continue;
        }
        let Some(caps) = LOG_NAME.captures(&name) else {
            continue;
        };
        let (Ok(rank), Ok(job)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            continue;
        };
        logs.push(WorkerLog {
            path: entry.into_path(),
            rank,
            job,
        });
    }
    logs.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(logs)
}
