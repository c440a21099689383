use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict printed by the sequential baseline solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BaselineResult {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl fmt::Display for BaselineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineResult::Satisfiable => write!(f, "SATISFIABLE"),
            BaselineResult::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            BaselineResult::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One problem line from a baseline results file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    /// Problem id.
    pub id: u32,
    /// Wall-clock seconds the baseline run took.
    pub duration: f64,
    pub result: BaselineResult,
}
