use crate::error::{Result, parse_field};
use cubetrace_types::{BaselineRecord, BaselineResult};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

/// Result line of a sequential baseline run.
/// Example: "Problem with id 17 took 354 seconds and ended with result SATISFIABLE"
static BASELINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"with id (\d+) took (\d+) seconds .* (SATISFIABLE|UNSATISFIABLE|UNKNOWN)$")
        .unwrap()
});

/// Parses a baseline results file. Lines that do not report a problem
/// result are ignored.
pub fn parse_baseline(path: &Path) -> Result<Vec<BaselineRecord>> {
    let mut records = Vec::new();
    for (index, line) in BufReader::new(File::open(path)?).lines().enumerate() {
        let line = line?;
        let Some(caps) = BASELINE.captures(&line) else {
            continue;
        };
        records.push(BaselineRecord {
            id: parse_field(&caps[1], "problem id", index + 1)?,
            duration: parse_field(&caps[2], "duration", index + 1)?,
            result: match &caps[3] {
                "SATISFIABLE" => BaselineResult::Satisfiable,
                "UNSATISFIABLE" => BaselineResult::Unsatisfiable,
                _ => BaselineResult::Unknown,
            },
        });
    }
    Ok(records)
}
