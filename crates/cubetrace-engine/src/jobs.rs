use crate::discover::worker_logs;
use crate::error::{Error, Result, parse_field};
use cubetrace_types::{JobRecord, JobResult};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Job introduction by the client.
/// Example: "1000.443 31 Introducing job #9 => [26]"
static INTRODUCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) \d+ Introducing job #(\d+) => \[\d+\]").unwrap());

/// Solution report by the client.
/// Example: "935.274 31 SOLUTION #7 UNSAT rev. 0"
static SOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) \d+ SOLUTION #(\d+) (UNSAT|SAT)").unwrap());

/// Timeout report by the client.
/// Example: "3600.002 31 TIMEOUT #12"
static TIMEOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) \d+ TIMEOUT #(\d+)").unwrap());

/// Cube generation kicked off on the root node. Both phrasings occur.
static GENERATION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+) .* (?:Started generating cubes|Cube generation has started)$")
        .unwrap()
});

/// Cube generation finished on the root node.
static GENERATION_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+) .* (?:Finished generating cubes|Cube generation has finished)$")
        .unwrap()
});

/// Example: "1200.5 <c-1#9:0> Sent 50 cubes to 3"
static SENT_CUBES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Sent (\d+) cubes to \d+$").unwrap());

/// Example: "1300.1 <c-1#9:0> Received 12 failed cubes from 3"
static RETURNED_CUBES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Received (\d+) failed cubes from \d+$").unwrap());

/// Example: "... Used cube has size 17"
static USED_CUBE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Used cube has size (\d+)").unwrap());

/// Example: "... Size of added buffer from failed assumptions: 23"
static FAILED_ASSUMPTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Size of added buffer from failed assumptions: (\d+)").unwrap());

/// Extracts per-job lifecycle records from a job directory.
///
/// The client node's log yields introductions and outcomes; the worker
/// logs yield cube generation details, keyed by the job id in their file
/// names. Lines naming a job the client never introduced are ignored.
/// Records come back sorted by job id.
pub fn extract_jobs(job_dir: &Path) -> Result<Vec<JobRecord>> {
    let mut jobs: HashMap<u32, JobRecord> = HashMap::new();

    let client = client_log(job_dir)?;
    for (index, line) in BufReader::new(File::open(&client)?).lines().enumerate() {
        let number = index + 1;
        let line = line?;
        if let Some(caps) = INTRODUCED.captures(&line) {
            let at = parse_field(&caps[1], "timestamp", number)?;
            let id = parse_field(&caps[2], "job id", number)?;
            jobs.insert(id, JobRecord::introduced(id, at));
        } else if let Some(caps) = SOLUTION.captures(&line) {
            let at: f64 = parse_field(&caps[1], "timestamp", number)?;
            let id: u32 = parse_field(&caps[2], "job id", number)?;
            if let Some(job) = jobs.get_mut(&id) {
                job.end_time = Some(at);
                job.duration = Some(at - job.start_time);
                job.result = match &caps[3] {
                    "SAT" => JobResult::Sat,
                    _ => JobResult::Unsat,
                };
            }
        } else if let Some(caps) = TIMEOUT.captures(&line) {
            let at: f64 = parse_field(&caps[1], "timestamp", number)?;
            let id: u32 = parse_field(&caps[2], "job id", number)?;
            if let Some(job) = jobs.get_mut(&id) {
                job.end_time = Some(at);
                job.duration = Some(at - job.start_time);
            }
        }
    }

    for log in worker_logs(job_dir)? {
        let Some(job) = jobs.get_mut(&log.job) else {
            continue;
        };
        scan_worker_log(&log.path, log.rank, job)?;
    }

    let mut records: Vec<JobRecord> = jobs.into_values().collect();
    records.sort_by_key(|job| job.id);
    Ok(records)
}

/// Picks the client node's log: node directories are numbered and the
/// client is the highest one, logging to `<n>/log.<n>`.
fn client_log(job_dir: &Path) -> Result<PathBuf> {
    let mut highest: Option<u32> = None;
    for entry in WalkDir::new(job_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Ok(node) = entry.file_name().to_string_lossy().parse::<u32>() {
            highest = Some(highest.map_or(node, |h| h.max(node)));
        }
    }
    let missing = || Error::MissingClientLog {
        dir: job_dir.to_path_buf(),
    };
    let node = highest.ok_or_else(missing)?;
    let path = job_dir.join(node.to_string()).join(format!("log.{}", node));
    if path.is_file() { Ok(path) } else { Err(missing()) }
}

fn scan_worker_log(path: &Path, rank: u32, job: &mut JobRecord) -> Result<()> {
    for (index, line) in BufReader::new(File::open(path)?).lines().enumerate() {
        let number = index + 1;
        let line = line?;
        if let Some(caps) = GENERATION_START.captures(&line) {
            job.generation_start = Some(parse_field(&caps[1], "timestamp", number)?);
            job.root_node = Some(rank);
        } else if let Some(caps) = GENERATION_END.captures(&line) {
            let at: f64 = parse_field(&caps[1], "timestamp", number)?;
            job.generation_end = Some(at);
            job.generation_duration = job.generation_start.map(|start| at - start);
        } else if let Some(caps) = SENT_CUBES.captures(&line) {
            job.sent_cubes += parse_field::<u32>(&caps[1], "cube count", number)?;
        } else if let Some(caps) = RETURNED_CUBES.captures(&line) {
            job.returned_failed_cubes += parse_field::<u32>(&caps[1], "cube count", number)?;
        } else if line.contains("DynamicCubeGeneratorThread created a new dynamic cube") {
            job.cube_count += 1;
        } else if let Some(caps) = USED_CUBE_SIZE.captures(&line) {
            let size: u32 = parse_field(&caps[1], "cube size", number)?;
            job.used_cube_size = Some(job.used_cube_size.map_or(size, |s| s.min(size)));
        } else if let Some(caps) = FAILED_ASSUMPTIONS.captures(&line) {
            let size: u32 = parse_field(&caps[1], "buffer size", number)?;
            job.failed_assumption_buffer =
                Some(job.failed_assumption_buffer.map_or(size, |s| s.min(size)));
        }
    }
    Ok(())
}
