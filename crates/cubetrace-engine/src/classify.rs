use cubetrace_types::{Event, ThreadAction, ThreadEvent, ThreadKind};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Head of a generator thread line.
/// Example: "919.207 <c-1#9:0> DynamicCubeGeneratorThread 0: Entering the main loop"
static GENERATOR_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) <.*> DynamicCubeGeneratorThread (\d+):").unwrap());

/// Head of a solver thread line.
/// Example: "919.229 <c-1#9:0> DynamicCubeSolverThread 1: Started solving a cube"
static SOLVER_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) <.*> DynamicCubeSolverThread (\d+):").unwrap());

/// The process joined the shared cube library.
/// Example: "919.223 <c-1#9:0> Joined dynamic cube lib"
static LIBRARY_JOINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) .* Joined dynamic cube lib$").unwrap());

/// A generator materialized a dynamic cube.
/// Example: "... DynamicCubeGeneratorThread 2: created a new dynamic cube with size 5"
static CUBE_CREATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"created a new dynamic cube with size (\d+)").unwrap());

/// End of a cube-pressure idle phase. The verb appears in both spellings.
static IDLE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"resume(s)? because there are no longer too many cubes$").unwrap());

/// A recognized line whose numeric field does not fit its target type.
#[derive(Debug)]
pub struct BadNumber {
    field: &'static str,
    text: String,
}

impl fmt::Display for BadNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} {:?}", self.field, self.text)
    }
}

impl std::error::Error for BadNumber {}

fn number<T: FromStr>(text: &str, field: &'static str) -> Result<T, BadNumber> {
    text.parse().map_err(|_| BadNumber {
        field,
        text: text.to_string(),
    })
}

/// Classifies one log line.
///
/// Returns None for lines outside the thread protocol, including
/// thread-headed lines whose message is not a lifecycle event. The only
/// error is a numeric field that does not parse.
pub fn classify(line: &str) -> Result<Option<Event>, BadNumber> {
    if let Some(caps) = GENERATOR_HEAD.captures(line) {
        let at = number(&caps[1], "timestamp")?;
        let instance = number(&caps[2], "instance id")?;
        return Ok(generator_action(line)?.map(|action| {
            Event::Thread(ThreadEvent {
                thread: ThreadKind::Generator,
                instance,
                at,
                action,
            })
        }));
    }
    if let Some(caps) = SOLVER_HEAD.captures(line) {
        let at = number(&caps[1], "timestamp")?;
        let instance = number(&caps[2], "instance id")?;
        return Ok(solver_action(line).map(|action| {
            Event::Thread(ThreadEvent {
                thread: ThreadKind::Solver,
                instance,
                at,
                action,
            })
        }));
    }
    if let Some(caps) = LIBRARY_JOINED.captures(line) {
        let at = number(&caps[1], "timestamp")?;
        return Ok(Some(Event::LibraryJoined { at }));
    }
    if line.ends_with("Destructing logger") {
        return Ok(Some(Event::LoggerDestructed));
    }
    Ok(None)
}

fn generator_action(line: &str) -> Result<Option<ThreadAction>, BadNumber> {
    let action = if line.ends_with("Entering the main loop") {
        ThreadAction::EnterLoop
    } else if line.ends_with("Leaving the main loop") {
        ThreadAction::LeaveLoop
    } else if line.contains("Started expanding a cube") {
        ThreadAction::StartWork
    } else if line.contains("Found split literal") {
        ThreadAction::SplitFound
    } else if line.contains("The cube failed") {
        ThreadAction::CubeFailed
    } else if line.contains("Found a solution") {
        ThreadAction::SolutionFound
    } else if line.contains("Interruption during") {
        ThreadAction::Interruption
    } else if let Some(caps) = CUBE_CREATED.captures(line) {
        ThreadAction::CubeCreated {
            size: number(&caps[1], "cube size")?,
        }
    } else if line.ends_with("could not create a new dynamic cube, the expanded cube was pruned") {
        ThreadAction::CubeCreationFailed
    } else if line.ends_with("waits because there are too many cubes") {
        ThreadAction::IdleStart
    } else if IDLE_END.is_match(line) {
        ThreadAction::IdleEnd
    } else if line.ends_with("waits because no cube could be assigned") {
        ThreadAction::WaitStart
    } else if line.ends_with("resumes because a cube could be assigned") {
        ThreadAction::WaitEnd
    } else {
        return Ok(None);
    };
    Ok(Some(action))
}

fn solver_action(line: &str) -> Option<ThreadAction> {
    // Solvers have no idle phase and never create or split cubes.
    let action = if line.ends_with("Entering the main loop") {
        ThreadAction::EnterLoop
    } else if line.ends_with("Leaving the main loop") {
        ThreadAction::LeaveLoop
    } else if line.contains("Started solving a cube") {
        ThreadAction::StartWork
    } else if line.contains("The cube failed") {
        ThreadAction::CubeFailed
    } else if line.contains("Found a solution") {
        ThreadAction::SolutionFound
    } else if line.contains("Interruption during") {
        ThreadAction::Interruption
    } else if line.ends_with("waits because no cube could be assigned") {
        ThreadAction::WaitStart
    } else if line.ends_with("resumes because a cube could be assigned") {
        ThreadAction::WaitEnd
    } else {
        return None;
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread_event(line: &str) -> ThreadEvent {
        match classify(line).unwrap() {
            Some(Event::Thread(event)) => event,
            other => panic!("expected thread event for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn classifies_generator_lifecycle() {
        let event = thread_event("919.207 <c-1#9:0> DynamicCubeGeneratorThread 0: Entering the main loop");
        assert_eq!(event.thread, ThreadKind::Generator);
        assert_eq!(event.instance, 0);
        assert_eq!(event.at, 919.207);
        assert_eq!(event.action, ThreadAction::EnterLoop);

        let event = thread_event("920.5 <c-1#9:0> DynamicCubeGeneratorThread 3: Leaving the main loop");
        assert_eq!(event.instance, 3);
        assert_eq!(event.action, ThreadAction::LeaveLoop);
    }

    #[test]
    fn classifies_generator_work_events() {
        let start = thread_event("10.5 <c-1#9:0> DynamicCubeGeneratorThread 1: Started expanding a cube");
        assert_eq!(start.action, ThreadAction::StartWork);

        let split = thread_event("11.5 <c-1#9:0> DynamicCubeGeneratorThread 1: Found split literal 42");
        assert_eq!(split.action, ThreadAction::SplitFound);

        let created =
            thread_event("12.0 <c-1#9:0> DynamicCubeGeneratorThread 1: created a new dynamic cube with size 17");
        assert_eq!(created.action, ThreadAction::CubeCreated { size: 17 });

        let pruned = thread_event(
            "12.5 <c-1#9:0> DynamicCubeGeneratorThread 1: could not create a new dynamic cube, the expanded cube was pruned",
        );
        assert_eq!(pruned.action, ThreadAction::CubeCreationFailed);
    }

    #[test]
    fn classifies_generator_idle_and_wait() {
        let idle = thread_event("13.0 <c-1#9:0> DynamicCubeGeneratorThread 0: waits because there are too many cubes");
        assert_eq!(idle.action, ThreadAction::IdleStart);

        let resumes =
            thread_event("14.0 <c-1#9:0> DynamicCubeGeneratorThread 0: resumes because there are no longer too many cubes");
        assert_eq!(resumes.action, ThreadAction::IdleEnd);

        // Older logs drop the s.
        let resume =
            thread_event("14.0 <c-1#9:0> DynamicCubeGeneratorThread 0: resume because there are no longer too many cubes");
        assert_eq!(resume.action, ThreadAction::IdleEnd);

        let wait = thread_event("15.0 <c-1#9:0> DynamicCubeGeneratorThread 0: waits because no cube could be assigned");
        assert_eq!(wait.action, ThreadAction::WaitStart);

        let assigned = thread_event("16.0 <c-1#9:0> DynamicCubeGeneratorThread 0: resumes because a cube could be assigned");
        assert_eq!(assigned.action, ThreadAction::WaitEnd);
    }

    #[test]
    fn classifies_solver_events() {
        let start = thread_event("20.0 <c-1#9:0> DynamicCubeSolverThread 2: Started solving a cube");
        assert_eq!(start.thread, ThreadKind::Solver);
        assert_eq!(start.action, ThreadAction::StartWork);

        let failed = thread_event("21.0 <c-1#9:0> DynamicCubeSolverThread 2: The cube failed");
        assert_eq!(failed.action, ThreadAction::CubeFailed);

        let solved = thread_event("22.0 <c-1#9:0> DynamicCubeSolverThread 2: Found a solution");
        assert_eq!(solved.action, ThreadAction::SolutionFound);

        let interrupted =
            thread_event("23.0 <c-1#9:0> DynamicCubeSolverThread 2: Interruption during solving");
        assert_eq!(interrupted.action, ThreadAction::Interruption);
    }

    #[test]
    fn solver_lines_never_yield_generator_only_actions() {
        let event = classify("24.0 <c-1#9:0> DynamicCubeSolverThread 2: waits because there are too many cubes")
            .unwrap();
        assert_eq!(event, None);

        let event =
            classify("25.0 <c-1#9:0> DynamicCubeSolverThread 2: Found split literal 3").unwrap();
        assert_eq!(event, None);
    }

    #[test]
    fn classifies_file_scope_events() {
        let joined = classify("919.223 <c-1#9:0> Joined dynamic cube lib").unwrap();
        assert_eq!(joined, Some(Event::LibraryJoined { at: 919.223 }));

        let destructed = classify("990.1 <c-1#9:0> Destructing logger").unwrap();
        assert_eq!(destructed, Some(Event::LoggerDestructed));
    }

    #[test]
    fn ignores_unrelated_lines() {
        assert_eq!(classify("919.2 <c-1#9:0> Sent 50 cubes to 3").unwrap(), None);
        assert_eq!(classify("garbage").unwrap(), None);
        assert_eq!(classify("").unwrap(), None);
        // Thread head with a message outside the protocol.
        assert_eq!(
            classify("919.2 <c-1#9:0> DynamicCubeGeneratorThread 0: Started generating cubes").unwrap(),
            None
        );
    }

    #[test]
    fn rejects_numbers_that_do_not_fit() {
        let err = classify("1.0 <c> DynamicCubeGeneratorThread 99999999999: Entering the main loop")
            .unwrap_err();
        assert!(err.to_string().contains("instance id"));

        let err = classify(
            "1.0 <c> DynamicCubeGeneratorThread 0: created a new dynamic cube with size 99999999999",
        )
        .unwrap_err();
        assert!(err.to_string().contains("cube size"));
    }
}
