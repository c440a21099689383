use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use cubetrace_engine::extract_memory;
use cubetrace_types::MemorySample;
use std::path::Path;

pub fn handle(file: &Path, format: OutputFormat) -> Result<()> {
    let samples = extract_memory(file)?;

    match format {
        OutputFormat::Plain => {
            print_samples(&samples);
            Ok(())
        }
        OutputFormat::Csv => output::write_csv(&samples),
        OutputFormat::Json => output::print_json(&samples),
    }
}

fn print_samples(samples: &[MemorySample]) {
    output::title("MEMORY");
    if samples.is_empty() {
        println!("No memory samples found.");
        return;
    }

    println!("{:>12} {:>10}", "TIME", "ACCMEM_GB");
    for sample in samples {
        println!(
            "{:>12} {:>10.2}",
            output::seconds(sample.at),
            sample.gigabytes
        );
    }
}
