//! Quantum memory simulation
//!
//! Reads five parameters from the console, simulates a noisy superposition
//! and charts the measurement counts.
//!
//! Log output goes to stderr; set `RUST_LOG=info` or `RUST_LOG=debug` to see
//! pipeline and simulator details.

use anyhow::Result;
use qmem_cli::{run, AppConfig, RunOutcome};
use std::io;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = AppConfig::default();
    let stdin = io::stdin();
    let stdout = io::stdout();

    match run(stdin.lock(), stdout.lock(), &config)? {
        RunOutcome::Completed(result) => {
            log::info!("{}", result);
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::InvalidInput => Ok(ExitCode::FAILURE),
    }
}
