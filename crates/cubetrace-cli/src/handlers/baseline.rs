use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use cubetrace_engine::parse_baseline;
use cubetrace_types::BaselineRecord;
use std::path::Path;

pub fn handle(file: &Path, format: OutputFormat) -> Result<()> {
    let records = parse_baseline(file)?;

    match format {
        OutputFormat::Plain => {
            print_baseline(&records);
            Ok(())
        }
        OutputFormat::Csv => output::write_csv(&records),
        OutputFormat::Json => output::print_json(&records),
    }
}

fn print_baseline(records: &[BaselineRecord]) {
    output::title("BASELINE");
    if records.is_empty() {
        println!("No baseline results found.");
        return;
    }

    println!("{:<5} {:>10} {:<14}", "ID", "DURATION", "RESULT");
    for record in records {
        println!(
            "{:<5} {:>10} {:<14}",
            record.id,
            output::seconds(record.duration),
            record.result
        );
    }
}
