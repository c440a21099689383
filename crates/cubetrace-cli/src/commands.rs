use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Threads { job_dir, kind } => {
            handlers::threads::handle(&job_dir, kind, cli.format)
        }
        Commands::Jobs { job_dir } => handlers::jobs::handle(&job_dir, cli.format),
        Commands::Baseline { file } => handlers::baseline::handle(&file, cli.format),
        Commands::Memory { file } => handlers::memory::handle(&file, cli.format),
    }
}
