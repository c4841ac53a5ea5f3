use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Status;
use crate::cli::app::App;
use crate::secrets::EnvSecrets;

mod cli;
mod config;
mod error;
mod secrets;
mod ui;

const LOG_VAR: &str = "HASHLAB_LOG";

fn main() -> ExitCode {
    init_tracing();
    let app = App::parse();

    let mut stdout = std::io::stdout().lock();
    let outcome = cli::run(app, &EnvSecrets, &mut stdout);
    let _ = stdout.flush();

    match outcome {
        Ok(Status::Success) => ExitCode::SUCCESS,
        Ok(Status::Mismatch) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(error::exit_code(&err))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
