//! koha-perldeps CLI binary.
//!
//! This is the entry point for the `koha-perldeps` command-line tool. It
//! initializes logging via `tracing`, parses arguments with `clap`, and
//! dispatches to the appropriate command handler. Failure classes map to
//! distinct exit codes so scripts can tell a missing release tree from an
//! empty extraction.

mod cli;
mod commands;

use std::process::ExitCode;

use perldeps_util::errors::PerldepsError;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match commands::dispatch(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report:?}");
            let code = report
                .downcast_ref::<PerldepsError>()
                .map(PerldepsError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
