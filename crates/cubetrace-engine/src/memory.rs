use crate::error::{Error, Result, parse_field};
use cubetrace_types::MemorySample;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

/// Accumulated-memory report somewhere on a line.
/// Example: "812.470 4 mainthread cpuratio=0.95 accmem=9.87"
static ACCMEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"accmem=(\d+\.\d+)").unwrap());

/// Leading timestamp of a log line.
static LEADING_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+\.\d+)").unwrap());

/// Pulls the accumulated-memory series out of one log file, in line order.
///
/// Every accmem report must sit on a line with a leading timestamp.
pub fn extract_memory(path: &Path) -> Result<Vec<MemorySample>> {
    let mut samples = Vec::new();
    for (index, line) in BufReader::new(File::open(path)?).lines().enumerate() {
        let number = index + 1;
        let line = line?;
        let Some(caps) = ACCMEM.captures(&line) else {
            continue;
        };
        let gigabytes = parse_field(&caps[1], "memory reading", number)?;
        let at = match LEADING_TIMESTAMP.captures(&line) {
            Some(time) => parse_field(&time[1], "timestamp", number)?,
            None => {
                return Err(Error::Parse {
                    line: number,
                    message: "accmem report without a leading timestamp".to_string(),
                });
            }
        };
        samples.push(MemorySample { at, gigabytes });
    }
    Ok(samples)
}
