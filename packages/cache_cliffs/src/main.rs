//! Pins the process to one processor, elevates it to real-time priority and runs the
//! full experiment suite against standard output.
//!
//! There are no command-line arguments: every sweep range and iteration count is fixed
//! at build time. Expect the run to take a while - the capacity sweep walks working
//! sets up to a gibibyte.

use std::io;
use std::process::ExitCode;

use cache_cliffs::{Environment, Error, ProcessorId, experiments};

/// The processor every run is pinned to. Which one it is does not matter; that it never
/// changes within a run does.
const MEASUREMENT_PROCESSOR: ProcessorId = 0;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("fatal: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    Environment::new().claim_processor(MEASUREMENT_PROCESSOR)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    experiments::run_all(&mut out)?;

    Ok(())
}
