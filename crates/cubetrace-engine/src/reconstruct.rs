use crate::classify::classify;
use crate::discover::WorkerLog;
use crate::error::{Error, Result};
use crate::tracker::{InstanceTotals, ThreadTracker};
use cubetrace_types::{Event, GeneratorRecord, SolverRecord, ThreadKind};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Everything reconstructed from one worker log.
#[derive(Debug, Clone, Serialize)]
pub struct FileTrace {
    pub generators: Vec<GeneratorRecord>,
    pub solvers: Vec<SolverRecord>,
}

/// Replays one worker log into per-instance records.
///
/// Reading stops at the logger destruction marker, which also validates
/// that every interval was closed. A log without the marker is treated as
/// truncated. Errors carry 1-based line numbers.
pub fn reconstruct_log(log: &WorkerLog) -> Result<FileTrace> {
    let file = File::open(&log.path)?;
    let mut generators = ThreadTracker::new(ThreadKind::Generator, log.job, log.rank);
    let mut solvers = ThreadTracker::new(ThreadKind::Solver, log.job, log.rank);

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let number = index + 1;
        let line = line?;
        let event = classify(&line).map_err(|e| Error::Parse {
            line: number,
            message: e.to_string(),
        })?;
        match event {
            None => {}
            Some(Event::Thread(event)) => {
                let tracker = match event.thread {
                    ThreadKind::Generator => &mut generators,
                    ThreadKind::Solver => &mut solvers,
                };
                tracker.apply(&event).map_err(|violation| Error::Protocol {
                    line: number,
                    violation,
                })?;
            }
            Some(Event::LibraryJoined { at }) => {
                generators.force_close_running(at);
                solvers.force_close_running(at);
            }
            Some(Event::LoggerDestructed) => {
                let mut open = generators.open_intervals();
                open.extend(solvers.open_intervals());
                if !open.is_empty() {
                    return Err(Error::UnclosedIntervals { open });
                }
                return Ok(FileTrace {
                    generators: generators
                        .finish()
                        .into_iter()
                        .map(InstanceTotals::into_generator)
                        .collect(),
                    solvers: solvers
                        .finish()
                        .into_iter()
                        .map(InstanceTotals::into_solver)
                        .collect(),
                });
            }
        }
    }
    Err(Error::MissingTerminator)
}
