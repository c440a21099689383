mod commands;

pub use commands::*;

use crate::types::OutputFormat;
use clap::Parser;

#[derive(Parser)]
#[command(name = "cubetrace")]
#[command(about = "Reconstruct thread and job traces from cube-and-conquer solver logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}
