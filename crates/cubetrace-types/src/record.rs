use serde::{Deserialize, Serialize};

/// Reconstructed behavior of one generator thread instance in one worker log.
///
/// Field order is the column order of tabular output; keep new fields at the
/// end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeneratorRecord {
    /// Job id taken from the log file name.
    pub job: u32,
    /// MPI rank of the worker process, taken from the log file name.
    pub rank: u32,
    /// Thread instance id printed by the thread itself.
    pub instance: u32,
    /// How many times the instance entered its main loop.
    pub times_started: u32,
    /// Accumulated seconds between loop entry and loop exit.
    pub run_time: f64,
    /// Accumulated seconds blocked waiting for a cube assignment.
    pub wait_time: f64,
    /// Accumulated seconds idled under cube pressure.
    pub idle_time: f64,
    /// Cubes whose expansion ran to a conclusion (split, failure,
    /// solution or interruption).
    pub processed_cubes: u32,
    /// Expansions that ended in a split literal.
    pub splits: u32,
    /// Whether this instance ever reported a solution.
    pub solved: bool,
    /// Cubes reported as failed.
    pub failed_cubes: u32,
    /// Dynamic cubes materialized by this instance.
    pub created_cubes: u32,
    /// Materialization attempts dropped because the cube was pruned.
    pub failed_created_cubes: u32,
    /// Expansions cut short from outside.
    pub interruptions: u32,
    /// Largest dynamic cube size seen, 0 when none was created.
    pub largest_cube: u32,
    /// Mean seconds per concluded expansion, None when no expansion ever
    /// concluded with a usable duration.
    pub average_time_per_cube: Option<f64>,
}

/// Reconstructed behavior of one solver thread instance in one worker log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SolverRecord {
    /// Job id taken from the log file name.
    pub job: u32,
    /// MPI rank of the worker process, taken from the log file name.
    pub rank: u32,
    /// Thread instance id printed by the thread itself.
    pub instance: u32,
    /// How many times the instance entered its main loop.
    pub times_started: u32,
    /// Accumulated seconds between loop entry and loop exit.
    pub run_time: f64,
    /// Accumulated seconds blocked waiting for a cube assignment.
    pub wait_time: f64,
    /// Cubes whose solve attempt ran to a conclusion.
    pub processed_cubes: u32,
    /// No log line reports a per-instance solve count; the column is kept
    /// at zero for downstream readers.
    pub solves: u32,
    /// Whether this instance ever reported a solution.
    pub solved: bool,
    /// Cubes reported as failed.
    pub failed_cubes: u32,
    /// Solve attempts cut short from outside.
    pub interruptions: u32,
    /// Mean seconds per concluded solve attempt, None when no attempt ever
    /// concluded with a usable duration.
    pub average_time_per_cube: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_field_order(json: &str, fields: &[&str]) {
        let mut last = 0;
        for field in fields {
            let needle = format!("\"{}\"", field);
            let pos = json
                .find(&needle)
                .unwrap_or_else(|| panic!("missing field {} in {}", field, json));
            assert!(pos >= last, "field {} out of order in {}", field, json);
            last = pos;
        }
    }

    #[test]
    fn generator_record_serializes_in_column_order() {
        let record = GeneratorRecord {
            job: 9,
            rank: 1,
            instance: 0,
            times_started: 1,
            average_time_per_cube: Some(0.25),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_field_order(
            &json,
            &[
                "job",
                "rank",
                "instance",
                "times_started",
                "run_time",
                "wait_time",
                "idle_time",
                "processed_cubes",
                "splits",
                "solved",
                "failed_cubes",
                "created_cubes",
                "failed_created_cubes",
                "interruptions",
                "largest_cube",
                "average_time_per_cube",
            ],
        );
    }

    #[test]
    fn solver_record_serializes_in_column_order() {
        let record = SolverRecord {
            job: 9,
            rank: 1,
            instance: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_field_order(
            &json,
            &[
                "job",
                "rank",
                "instance",
                "times_started",
                "run_time",
                "wait_time",
                "processed_cubes",
                "solves",
                "solved",
                "failed_cubes",
                "interruptions",
                "average_time_per_cube",
            ],
        );
    }

    #[test]
    fn missing_average_serializes_as_null() {
        let record = SolverRecord::default();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"average_time_per_cube\":null"));
    }
}
