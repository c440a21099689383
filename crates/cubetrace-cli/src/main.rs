use clap::Parser;
use cubetrace::{Cli, run};

fn main() {
    // Restore default SIGPIPE behavior so piping into `head` or `less`
    // that exits early terminates us quietly instead of panicking
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
