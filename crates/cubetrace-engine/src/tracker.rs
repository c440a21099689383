use crate::interval::{Activity, Interval};
use cubetrace_types::{GeneratorRecord, SolverRecord, ThreadAction, ThreadEvent, ThreadKind};
use std::collections::HashMap;
use std::fmt;

/// A line that contradicts the interval protocol for its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// An opening line arrived while the same activity was already open.
    AlreadyOpen {
        thread: ThreadKind,
        instance: u32,
        activity: Activity,
    },
    /// A closing line arrived with nothing open to close.
    NotOpen {
        thread: ThreadKind,
        instance: u32,
        activity: Activity,
    },
    /// A counting line arrived for an instance that never entered its
    /// main loop.
    NeverEntered { thread: ThreadKind, instance: u32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::AlreadyOpen {
                thread,
                instance,
                activity,
            } => write!(
                f,
                "{} interval of {} instance {} is already open",
                activity, thread, instance
            ),
            Violation::NotOpen {
                thread,
                instance,
                activity,
            } => write!(
                f,
                "{} interval of {} instance {} is not open",
                activity, thread, instance
            ),
            Violation::NeverEntered { thread, instance } => write!(
                f,
                "{} instance {} never entered its main loop",
                thread, instance
            ),
        }
    }
}

/// An interval still open when the log reached its terminal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenInterval {
    pub thread: ThreadKind,
    pub instance: u32,
    pub activity: Activity,
}

impl fmt::Display for OpenInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} interval of {} instance {}",
            self.activity, self.thread, self.instance
        )
    }
}

/// Accumulated totals for one thread instance, in the superset shape shared
/// by both thread kinds. Conversion into the kind-specific record happens
/// once the log's terminal marker has been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceTotals {
    pub job: u32,
    pub rank: u32,
    pub instance: u32,
    pub times_started: u32,
    pub run_time: f64,
    pub wait_time: f64,
    pub idle_time: f64,
    pub processed_cubes: u32,
    pub splits: u32,
    pub solved: bool,
    pub failed_cubes: u32,
    pub created_cubes: u32,
    pub failed_created_cubes: u32,
    pub interruptions: u32,
    pub largest_cube: u32,
    pub average_time_per_cube: Option<f64>,
}

impl InstanceTotals {
    fn new(job: u32, rank: u32, instance: u32) -> Self {
        InstanceTotals {
            job,
            rank,
            instance,
            times_started: 1,
            run_time: 0.0,
            wait_time: 0.0,
            idle_time: 0.0,
            processed_cubes: 0,
            splits: 0,
            solved: false,
            failed_cubes: 0,
            created_cubes: 0,
            failed_created_cubes: 0,
            interruptions: 0,
            largest_cube: 0,
            average_time_per_cube: None,
        }
    }

    pub fn into_generator(self) -> GeneratorRecord {
        GeneratorRecord {
            job: self.job,
            rank: self.rank,
            instance: self.instance,
            times_started: self.times_started,
            run_time: self.run_time,
            wait_time: self.wait_time,
            idle_time: self.idle_time,
            processed_cubes: self.processed_cubes,
            splits: self.splits,
            solved: self.solved,
            failed_cubes: self.failed_cubes,
            created_cubes: self.created_cubes,
            failed_created_cubes: self.failed_created_cubes,
            interruptions: self.interruptions,
            largest_cube: self.largest_cube,
            average_time_per_cube: self.average_time_per_cube,
        }
    }

    pub fn into_solver(self) -> SolverRecord {
        SolverRecord {
            job: self.job,
            rank: self.rank,
            instance: self.instance,
            times_started: self.times_started,
            run_time: self.run_time,
            wait_time: self.wait_time,
            processed_cubes: self.processed_cubes,
            solves: 0,
            solved: self.solved,
            failed_cubes: self.failed_cubes,
            interruptions: self.interruptions,
            average_time_per_cube: self.average_time_per_cube,
        }
    }
}

/// Interval state and duration samples for one instance.
///
/// Kept apart from the totals: interval state may exist before the instance
/// ever enters its main loop.
#[derive(Debug, Default)]
struct ActivityState {
    run: Interval,
    work: Interval,
    idle: Interval,
    wait: Interval,
    /// Seconds each concluded work span took, in conclusion order.
    samples: Vec<f64>,
}

impl ActivityState {
    fn interval(&self, activity: Activity) -> Interval {
        match activity {
            Activity::Run => self.run,
            Activity::Work => self.work,
            Activity::Idle => self.idle,
            Activity::Wait => self.wait,
        }
    }

    fn interval_mut(&mut self, activity: Activity) -> &mut Interval {
        match activity {
            Activity::Run => &mut self.run,
            Activity::Work => &mut self.work,
            Activity::Idle => &mut self.idle,
            Activity::Wait => &mut self.wait,
        }
    }
}

/// Replays the lifecycle events of one thread kind within one worker log.
///
/// Both kinds share the same machinery; the few divergent counting rules
/// dispatch on the tracker's kind. Totals come out in the order each
/// instance first entered its main loop.
#[derive(Debug)]
pub struct ThreadTracker {
    thread: ThreadKind,
    job: u32,
    rank: u32,
    /// Instance id -> slot in `records`, in first-enter order.
    index: HashMap<u32, usize>,
    records: Vec<InstanceTotals>,
    states: HashMap<u32, ActivityState>,
}

impl ThreadTracker {
    pub fn new(thread: ThreadKind, job: u32, rank: u32) -> Self {
        ThreadTracker {
            thread,
            job,
            rank,
            index: HashMap::new(),
            records: Vec::new(),
            states: HashMap::new(),
        }
    }

    /// Applies one classified event. The event must belong to this
    /// tracker's thread kind.
    pub fn apply(&mut self, event: &ThreadEvent) -> Result<(), Violation> {
        debug_assert_eq!(event.thread, self.thread);
        let (instance, at) = (event.instance, event.at);
        match event.action {
            ThreadAction::EnterLoop => {
                match self.index.get(&instance) {
                    Some(&slot) => self.records[slot].times_started += 1,
                    None => {
                        self.index.insert(instance, self.records.len());
                        self.records
                            .push(InstanceTotals::new(self.job, self.rank, instance));
                    }
                }
                self.open(instance, Activity::Run, at)
            }
            ThreadAction::LeaveLoop => {
                let elapsed = self.close(instance, Activity::Run, at)?;
                self.totals_mut(instance)?.run_time += elapsed;
                Ok(())
            }
            ThreadAction::StartWork => self.open(instance, Activity::Work, at),
            ThreadAction::SplitFound => {
                let elapsed = self.close(instance, Activity::Work, at)?;
                let totals = self.totals_mut(instance)?;
                totals.processed_cubes += 1;
                totals.splits += 1;
                self.sample(instance, elapsed);
                Ok(())
            }
            ThreadAction::CubeFailed => match self.thread {
                // Generators count the failure without touching the work
                // interval; failures reach them out of band.
                ThreadKind::Generator => {
                    self.totals_mut(instance)?.failed_cubes += 1;
                    Ok(())
                }
                ThreadKind::Solver => {
                    let elapsed = self.close(instance, Activity::Work, at)?;
                    let totals = self.totals_mut(instance)?;
                    totals.processed_cubes += 1;
                    totals.failed_cubes += 1;
                    self.sample(instance, elapsed);
                    Ok(())
                }
            },
            ThreadAction::SolutionFound => match self.thread {
                ThreadKind::Generator => {
                    self.totals_mut(instance)?.solved = true;
                    Ok(())
                }
                ThreadKind::Solver => {
                    let elapsed = self.close(instance, Activity::Work, at)?;
                    let totals = self.totals_mut(instance)?;
                    totals.processed_cubes += 1;
                    totals.solved = true;
                    self.sample(instance, elapsed);
                    Ok(())
                }
            },
            ThreadAction::Interruption => {
                // Interrupted spans do not contribute a duration sample.
                self.close(instance, Activity::Work, at)?;
                let totals = self.totals_mut(instance)?;
                totals.processed_cubes += 1;
                totals.interruptions += 1;
                Ok(())
            }
            ThreadAction::CubeCreated { size } => {
                let totals = self.totals_mut(instance)?;
                totals.created_cubes += 1;
                totals.largest_cube = totals.largest_cube.max(size);
                Ok(())
            }
            ThreadAction::CubeCreationFailed => {
                self.totals_mut(instance)?.failed_created_cubes += 1;
                Ok(())
            }
            ThreadAction::IdleStart => self.open(instance, Activity::Idle, at),
            ThreadAction::IdleEnd => {
                let elapsed = self.close(instance, Activity::Idle, at)?;
                self.totals_mut(instance)?.idle_time += elapsed;
                Ok(())
            }
            ThreadAction::WaitStart => self.open(instance, Activity::Wait, at),
            ThreadAction::WaitEnd => {
                let elapsed = self.close(instance, Activity::Wait, at)?;
                self.totals_mut(instance)?.wait_time += elapsed;
                Ok(())
            }
        }
    }

    /// Force-closes every open run interval at `at`, crediting the elapsed
    /// time to the instance's totals. Sanctioned by the library-joined
    /// line; work, idle and wait intervals are left untouched.
    pub fn force_close_running(&mut self, at: f64) {
        for (&instance, state) in self.states.iter_mut() {
            // A run interval can only be open after an enter, which
            // created the totals slot.
            if let Some(elapsed) = state.run.close(at)
                && let Some(&slot) = self.index.get(&instance)
            {
                self.records[slot].run_time += elapsed;
            }
        }
    }

    /// Intervals still open, for terminal-marker validation. Ordered by
    /// instance then activity so error messages are deterministic.
    pub fn open_intervals(&self) -> Vec<OpenInterval> {
        let mut open = Vec::new();
        for (&instance, state) in &self.states {
            for activity in Activity::ALL {
                if state.interval(activity).is_open() {
                    open.push(OpenInterval {
                        thread: self.thread,
                        instance,
                        activity,
                    });
                }
            }
        }
        open.sort_by_key(|open| (open.instance, open.activity));
        open
    }

    /// Consumes the tracker, yielding per-instance totals in first-enter
    /// order with averages filled in.
    pub fn finish(mut self) -> Vec<InstanceTotals> {
        for totals in &mut self.records {
            if let Some(state) = self.states.get(&totals.instance)
                && !state.samples.is_empty()
            {
                let sum: f64 = state.samples.iter().sum();
                totals.average_time_per_cube = Some(sum / state.samples.len() as f64);
            }
        }
        self.records
    }

    fn open(&mut self, instance: u32, activity: Activity, at: f64) -> Result<(), Violation> {
        if self
            .states
            .entry(instance)
            .or_default()
            .interval_mut(activity)
            .open(at)
        {
            Ok(())
        } else {
            Err(Violation::AlreadyOpen {
                thread: self.thread,
                instance,
                activity,
            })
        }
    }

    fn close(&mut self, instance: u32, activity: Activity, at: f64) -> Result<f64, Violation> {
        let not_open = Violation::NotOpen {
            thread: self.thread,
            instance,
            activity,
        };
        match self.states.get_mut(&instance) {
            Some(state) => state.interval_mut(activity).close(at).ok_or(not_open),
            None => Err(not_open),
        }
    }

    fn totals_mut(&mut self, instance: u32) -> Result<&mut InstanceTotals, Violation> {
        match self.index.get(&instance) {
            Some(&slot) => Ok(&mut self.records[slot]),
            None => Err(Violation::NeverEntered {
                thread: self.thread,
                instance,
            }),
        }
    }

    fn sample(&mut self, instance: u32, elapsed: f64) {
        self.states.entry(instance).or_default().samples.push(elapsed);
    }
}
