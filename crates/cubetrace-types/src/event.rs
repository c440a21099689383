use std::fmt;

/// Which of the two cube-and-conquer thread families emitted a line.
///
/// Generators expand cubes and publish split literals; solvers pull cubes
/// from the shared store and try to solve them. The two kinds share the
/// enter/leave/work/wait lifecycle but diverge in which events exist for
/// them and in how a few shared events are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadKind {
    Generator,
    Solver,
}

impl fmt::Display for ThreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadKind::Generator => write!(f, "generator"),
            ThreadKind::Solver => write!(f, "solver"),
        }
    }
}

/// Lifecycle action reported by a single thread-scoped log line.
///
/// Actions are ephemeral: they drive the interval trackers during
/// reconstruction and are never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThreadAction {
    /// The instance entered its main loop (opens the run interval).
    EnterLoop,
    /// The instance left its main loop (closes the run interval).
    LeaveLoop,
    /// The instance picked up a cube (opens the work interval).
    StartWork,
    /// A generator found a split literal (closes the work interval).
    SplitFound,
    /// The cube under work failed. Counted differently per kind.
    CubeFailed,
    /// The cube under work produced a solution.
    SolutionFound,
    /// Work on the current cube was interrupted from outside.
    Interruption,
    /// A generator materialized a new dynamic cube of the given size.
    CubeCreated { size: u32 },
    /// A generator tried to materialize a cube but it had been pruned.
    CubeCreationFailed,
    /// The instance went idle because too many cubes exist (generators only).
    IdleStart,
    /// The instance resumed from cube-pressure idling.
    IdleEnd,
    /// The instance blocked because no cube could be assigned.
    WaitStart,
    /// The instance got a cube assigned and resumed.
    WaitEnd,
}

/// One classified thread-scoped log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadEvent {
    /// Thread family the line belongs to.
    pub thread: ThreadKind,
    /// Per-file instance id printed by the thread itself.
    pub instance: u32,
    /// Seconds since solver start, as printed at the head of the line.
    pub at: f64,
    /// What happened.
    pub action: ThreadAction,
}

/// Any line the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A thread-scoped lifecycle line.
    Thread(ThreadEvent),
    /// The process joined the shared cube library; running loops are
    /// force-closed at this timestamp.
    LibraryJoined { at: f64 },
    /// The logger was torn down. Terminal marker of a complete log.
    LoggerDestructed,
}
