use crate::tracker::{OpenInterval, Violation};
use std::fmt;
use std::path::PathBuf;

/// Result type for cubetrace-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during reconstruction and extraction
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Walkdir error
    WalkDir(walkdir::Error),

    /// A recognized line carried a field that does not parse
    Parse { line: usize, message: String },

    /// A line contradicted the interval protocol
    Protocol { line: usize, violation: Violation },

    /// The terminal marker arrived while intervals were still open
    UnclosedIntervals { open: Vec<OpenInterval> },

    /// The log ended without the logger destruction marker
    MissingTerminator,

    /// The job directory has no client node log
    MissingClientLog { dir: PathBuf },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            Error::Protocol { line, violation } => {
                write!(f, "Protocol violation on line {}: {}", line, violation)
            }
            Error::UnclosedIntervals { open } => {
                write!(f, "Log ended with open intervals: ")?;
                for (i, interval) in open.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", interval)?;
                }
                Ok(())
            }
            Error::MissingTerminator => {
                write!(f, "Log ended without the logger destruction marker")
            }
            Error::MissingClientLog { dir } => {
                write!(f, "No client node log under {}", dir.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

/// Parses one captured field, reporting failures as a parse error at the
/// given 1-based line number.
pub(crate) fn parse_field<T: std::str::FromStr>(
    text: &str,
    what: &str,
    line: usize,
) -> Result<T> {
    text.parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid {} {:?}", what, text),
    })
}
