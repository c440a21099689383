use std::fmt;

/// The four bracketed activities a thread instance can be inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Activity {
    /// Between entering and leaving the main loop.
    Run,
    /// Between picking up a cube and concluding it.
    Work,
    /// Idling under cube pressure (generators only).
    Idle,
    /// Blocked waiting for a cube assignment.
    Wait,
}

impl Activity {
    pub const ALL: [Activity; 4] = [Activity::Run, Activity::Work, Activity::Idle, Activity::Wait];
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Run => write!(f, "run"),
            Activity::Work => write!(f, "work"),
            Activity::Idle => write!(f, "idle"),
            Activity::Wait => write!(f, "wait"),
        }
    }
}

/// Open/closed state of one bracketed activity.
///
/// An interval is opened by the activity's start line and closed by its end
/// line; closing yields the elapsed time between the two.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interval {
    #[default]
    Closed,
    Open(f64),
}

impl Interval {
    /// Opens the interval at `at`. Returns false when it is already open.
    pub fn open(&mut self, at: f64) -> bool {
        match self {
            Interval::Closed => {
                *self = Interval::Open(at);
                true
            }
            Interval::Open(_) => false,
        }
    }

    /// Closes the interval at `at`, yielding the time elapsed since the
    /// matching open. None when nothing is open.
    pub fn close(&mut self, at: f64) -> Option<f64> {
        match *self {
            Interval::Open(start) => {
                *self = Interval::Closed;
                Some(at - start)
            }
            Interval::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Interval::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_yields_elapsed() {
        let mut interval = Interval::default();
        assert!(interval.open(10.0));
        assert!(interval.is_open());
        assert_eq!(interval.close(12.5), Some(2.5));
        assert!(!interval.is_open());
    }

    #[test]
    fn double_open_is_rejected() {
        let mut interval = Interval::default();
        assert!(interval.open(1.0));
        assert!(!interval.open(2.0));
        // The first open survives the rejected second one.
        assert_eq!(interval.close(3.0), Some(2.0));
    }

    #[test]
    fn close_without_open_is_rejected() {
        let mut interval = Interval::default();
        assert_eq!(interval.close(5.0), None);
    }

    #[test]
    fn interval_is_reusable_after_close() {
        let mut interval = Interval::default();
        interval.open(1.0);
        interval.close(2.0);
        assert!(interval.open(7.0));
        assert_eq!(interval.close(8.0), Some(1.0));
    }
}
