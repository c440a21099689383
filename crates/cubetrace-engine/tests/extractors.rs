use cubetrace_engine::{Error, extract_jobs, extract_memory, parse_baseline};
use cubetrace_testing::{JobDir, lines};
use cubetrace_types::{BaselineResult, JobResult};
use std::fs;

#[test]
fn extracts_job_lifecycle_from_client_and_workers() {
    let dir = JobDir::new();
    let client = [
        lines::client(100.0, 31, "Introducing job #9 => [26]"),
        lines::client(100.5, 31, "Introducing job #10 => [27]"),
        lines::client(935.0, 31, "SOLUTION #9 UNSAT rev. 0"),
        lines::client(3600.0, 31, "TIMEOUT #10"),
    ]
    .join("\n");
    dir.write_client_log(31, &client).unwrap();

    let worker = [
        "120.000 <c-1#9:0> Started generating cubes",
        "120.500 <c-1#9:0> DynamicCubeGeneratorThread created a new dynamic cube",
        "121.000 <c-1#9:0> DynamicCubeGeneratorThread created a new dynamic cube",
        "125.000 <c-1#9:0> Finished generating cubes",
        "130.000 <c-1#9:0> Sent 40 cubes to 5",
        "131.000 <c-1#9:0> Sent 10 cubes to 6",
        "140.000 <c-1#9:0> Received 4 failed cubes from 5",
        "141.000 <c-1#9:0> Used cube has size 17",
        "142.000 <c-1#9:0> Used cube has size 12",
        "143.000 <c-1#9:0> Size of added buffer from failed assumptions: 23",
    ]
    .join("\n");
    dir.write_worker_log(3, 3, 9, &worker).unwrap();

    // A worker log for a job the client never introduced.
    dir.write_worker_log(4, 4, 99, "1.000 <c> Sent 5 cubes to 2")
        .unwrap();

    let jobs = extract_jobs(dir.path()).unwrap();
    assert_eq!(jobs.len(), 2);

    let job9 = &jobs[0];
    assert_eq!(job9.id, 9);
    assert_eq!(job9.start_time, 100.0);
    assert_eq!(job9.end_time, Some(935.0));
    assert_eq!(job9.duration, Some(835.0));
    assert_eq!(job9.result, JobResult::Unsat);
    assert_eq!(job9.generation_start, Some(120.0));
    assert_eq!(job9.generation_end, Some(125.0));
    assert_eq!(job9.generation_duration, Some(5.0));
    assert_eq!(job9.root_node, Some(3));
    assert_eq!(job9.cube_count, 2);
    assert_eq!(job9.sent_cubes, 50);
    assert_eq!(job9.returned_failed_cubes, 4);
    assert_eq!(job9.used_cube_size, Some(12));
    assert_eq!(job9.failed_assumption_buffer, Some(23));

    let job10 = &jobs[1];
    assert_eq!(job10.id, 10);
    assert_eq!(job10.result, JobResult::Unknown);
    assert_eq!(job10.end_time, Some(3600.0));
    assert_eq!(job10.duration, Some(3499.5));
    assert_eq!(job10.generation_start, None);
    assert_eq!(job10.root_node, None);
}

#[test]
fn sat_solution_and_alternate_generation_phrasing() {
    let dir = JobDir::new();
    let client = [
        lines::client(10.0, 8, "Introducing job #3 => [4]"),
        lines::client(50.0, 8, "SOLUTION #3 SAT rev. 0"),
    ]
    .join("\n");
    dir.write_client_log(8, &client).unwrap();

    let worker = [
        "12.000 <c-1#3:0> Cube generation has started",
        "14.000 <c-1#3:0> Cube generation has finished",
    ]
    .join("\n");
    dir.write_worker_log(2, 2, 3, &worker).unwrap();

    let jobs = extract_jobs(dir.path()).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].result, JobResult::Sat);
    assert_eq!(jobs[0].generation_duration, Some(2.0));
    assert_eq!(jobs[0].root_node, Some(2));
}

#[test]
fn generation_end_without_start_leaves_duration_unset() {
    let dir = JobDir::new();
    dir.write_client_log(5, &lines::client(10.0, 5, "Introducing job #1 => [2]"))
        .unwrap();
    dir.write_worker_log(1, 1, 1, "14.000 <c-1#1:0> Finished generating cubes")
        .unwrap();

    let jobs = extract_jobs(dir.path()).unwrap();
    assert_eq!(jobs[0].generation_end, Some(14.0));
    assert_eq!(jobs[0].generation_duration, None);
}

#[test]
fn missing_client_log_is_an_error() {
    let dir = JobDir::new();
    // Worker node directories exist, but none of them holds the client log.
    dir.write_worker_log(1, 1, 9, "1.000 noise").unwrap();

    match extract_jobs(dir.path()).unwrap_err() {
        Error::MissingClientLog { dir: missing } => assert_eq!(missing, dir.path()),
        other => panic!("expected missing client log, got {}", other),
    }
}

#[test]
fn parses_baseline_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline.txt");
    fs::write(
        &path,
        [
            "Starting baseline run over 20 problems",
            "Problem with id 3 took 120 seconds and ended with result SATISFIABLE",
            "Problem with id 4 took 3600 seconds and ended with result UNKNOWN",
            "Problem with id 5 took 45 seconds and ended with result UNSATISFIABLE",
            "All problems done",
        ]
        .join("\n"),
    )
    .unwrap();

    let records = parse_baseline(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].id, 3);
    assert_eq!(records[0].duration, 120.0);
    assert_eq!(records[0].result, BaselineResult::Satisfiable);
    assert_eq!(records[1].result, BaselineResult::Unknown);
    assert_eq!(records[2].result, BaselineResult::Unsatisfiable);
}

#[test]
fn extracts_memory_series_in_line_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.1#9");
    fs::write(
        &path,
        [
            "10.000 4 mainthread cpuratio=0.95 accmem=1.50",
            "some unrelated line",
            "20.000 4 mainthread accmem=2.25",
        ]
        .join("\n"),
    )
    .unwrap();

    let samples = extract_memory(&path).unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].at, 10.0);
    assert_eq!(samples[0].gigabytes, 1.5);
    assert_eq!(samples[1].at, 20.0);
    assert_eq!(samples[1].gigabytes, 2.25);
}

#[test]
fn accmem_without_timestamp_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.1#9");
    fs::write(
        &path,
        ["10.000 4 mainthread accmem=1.50", "orphaned accmem=9.99"].join("\n"),
    )
    .unwrap();

    match extract_memory(&path).unwrap_err() {
        Error::Parse { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("timestamp"), "message: {}", message);
        }
        other => panic!("expected parse error, got {}", other),
    }
}
