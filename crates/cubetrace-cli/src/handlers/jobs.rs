use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use cubetrace_engine::extract_jobs;
use cubetrace_types::JobRecord;
use std::path::Path;

pub fn handle(job_dir: &Path, format: OutputFormat) -> Result<()> {
    let jobs = extract_jobs(job_dir)?;

    match format {
        OutputFormat::Plain => {
            print_jobs(&jobs);
            Ok(())
        }
        OutputFormat::Csv => output::write_csv(&jobs),
        OutputFormat::Json => output::print_json(&jobs),
    }
}

fn print_jobs(jobs: &[JobRecord]) {
    output::title("JOBS");
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    println!(
        "{:<5} {:>10} {:>10} {:>10} {:<8} {:>10} {:>10} {:>9} {:>5} {:>6} {:>6} {:>9} {:>9} {:>8}",
        "ID",
        "START",
        "END",
        "DURATION",
        "RESULT",
        "GEN_START",
        "GEN_END",
        "GEN_TIME",
        "ROOT",
        "CUBES",
        "SENT",
        "RETURNED",
        "MIN_SIZE",
        "MIN_BUF"
    );
    for job in jobs {
        println!(
            "{:<5} {:>10} {:>10} {:>10} {:<8} {:>10} {:>10} {:>9} {:>5} {:>6} {:>6} {:>9} {:>9} {:>8}",
            job.id,
            output::seconds(job.start_time),
            output::dash(job.end_time.map(output::seconds)),
            output::dash(job.duration.map(output::seconds)),
            job.result,
            output::dash(job.generation_start.map(output::seconds)),
            output::dash(job.generation_end.map(output::seconds)),
            output::dash(job.generation_duration.map(output::seconds)),
            output::dash(job.root_node),
            job.cube_count,
            job.sent_cubes,
            job.returned_failed_cubes,
            output::dash(job.used_cube_size),
            output::dash(job.failed_assumption_buffer)
        );
    }
}
