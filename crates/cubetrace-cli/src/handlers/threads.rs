use crate::output;
use crate::types::{OutputFormat, ThreadFilter};
use anyhow::Result;
use cubetrace_engine::reconstruct_job_dir;
use cubetrace_types::{GeneratorRecord, SolverRecord};
use serde_json::json;
use std::path::Path;

pub fn handle(job_dir: &Path, kind: ThreadFilter, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Csv && kind == ThreadFilter::Both {
        anyhow::bail!(
            "csv output mixes generator and solver columns; pass --kind generator or --kind solver"
        );
    }

    let trace = reconstruct_job_dir(job_dir)?;
    for skipped in &trace.skipped {
        output::warn(&format!(
            "skipping {}: {}",
            skipped.path.display(),
            skipped.error
        ));
    }
    if !trace.skipped.is_empty() {
        output::warn(&format!("{} worker log(s) skipped", trace.skipped.len()));
    }

    match format {
        OutputFormat::Plain => {
            match kind {
                ThreadFilter::Generator => print_generators(&trace.generators),
                ThreadFilter::Solver => print_solvers(&trace.solvers),
                ThreadFilter::Both => {
                    print_generators(&trace.generators);
                    println!();
                    print_solvers(&trace.solvers);
                }
            }
            Ok(())
        }
        OutputFormat::Csv => {
            // Both was rejected up front.
            if kind == ThreadFilter::Generator {
                output::write_csv(&trace.generators)
            } else {
                output::write_csv(&trace.solvers)
            }
        }
        OutputFormat::Json => match kind {
            ThreadFilter::Generator => output::print_json(&trace.generators),
            ThreadFilter::Solver => output::print_json(&trace.solvers),
            ThreadFilter::Both => output::print_json(&json!({
                "generators": trace.generators,
                "solvers": trace.solvers,
            })),
        },
    }
}

fn print_generators(records: &[GeneratorRecord]) {
    output::title("GENERATORS");
    if records.is_empty() {
        println!("No generator threads found.");
        return;
    }

    println!(
        "{:<5} {:<5} {:<5} {:<7} {:>10} {:>10} {:>10} {:>6} {:>7} {:<6} {:>7} {:>8} {:>7} {:>5} {:>8} {:>10}",
        "JOB",
        "RANK",
        "INST",
        "STARTS",
        "RUN",
        "WAIT",
        "IDLE",
        "CUBES",
        "SPLITS",
        "SOLVED",
        "FAILED",
        "CREATED",
        "PRUNED",
        "INTR",
        "LARGEST",
        "AVG/CUBE"
    );
    for record in records {
        println!(
            "{:<5} {:<5} {:<5} {:<7} {:>10} {:>10} {:>10} {:>6} {:>7} {:<6} {:>7} {:>8} {:>7} {:>5} {:>8} {:>10}",
            record.job,
            record.rank,
            record.instance,
            record.times_started,
            output::seconds(record.run_time),
            output::seconds(record.wait_time),
            output::seconds(record.idle_time),
            record.processed_cubes,
            record.splits,
            record.solved,
            record.failed_cubes,
            record.created_cubes,
            record.failed_created_cubes,
            record.interruptions,
            record.largest_cube,
            output::dash(record.average_time_per_cube.map(output::seconds))
        );
    }
}

fn print_solvers(records: &[SolverRecord]) {
    output::title("SOLVERS");
    if records.is_empty() {
        println!("No solver threads found.");
        return;
    }

    println!(
        "{:<5} {:<5} {:<5} {:<7} {:>10} {:>10} {:>6} {:>7} {:<6} {:>7} {:>5} {:>10}",
        "JOB", "RANK", "INST", "STARTS", "RUN", "WAIT", "CUBES", "SOLVES", "SOLVED", "FAILED",
        "INTR", "AVG/CUBE"
    );
    for record in records {
        println!(
            "{:<5} {:<5} {:<5} {:<7} {:>10} {:>10} {:>6} {:>7} {:<6} {:>7} {:>5} {:>10}",
            record.job,
            record.rank,
            record.instance,
            record.times_started,
            output::seconds(record.run_time),
            output::seconds(record.wait_time),
            record.processed_cubes,
            record.solves,
            record.solved,
            record.failed_cubes,
            record.interruptions,
            output::dash(record.average_time_per_cube.map(output::seconds))
        );
    }
}
