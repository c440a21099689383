use crate::types::ThreadFilter;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Reconstruct per-thread behavior from a job directory")]
    Threads {
        /// Directory holding the per-node subdirectories of one run
        job_dir: PathBuf,

        #[arg(long, default_value = "both")]
        kind: ThreadFilter,
    },

    #[command(about = "Extract per-job lifecycle records from a job directory")]
    Jobs {
        /// Directory holding the per-node subdirectories of one run
        job_dir: PathBuf,
    },

    #[command(about = "Parse sequential baseline solver results")]
    Baseline {
        /// File with one result line per solved problem
        file: PathBuf,
    },

    #[command(about = "Pull the accumulated-memory series out of a log file")]
    Memory {
        /// Worker log file with accmem reports
        file: PathBuf,
    },
}
