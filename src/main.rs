//! estimar CLI - animated sample-mean Monte Carlo integration.

use std::process::ExitCode;

use estimar::cli::{execute, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
