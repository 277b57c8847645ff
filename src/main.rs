//! Bloom - Entry Point

use std::process::ExitCode;

use clap::Parser;

use bloom_tracker::cli::Cli;
use bloom_tracker::{commands, AppError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initiera logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Startar Bloom v{}", env!("CARGO_PKG_VERSION"));

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fel: {:#}", e);
            // Ogiltig indata eller saknad inloggning är inget tillfälligt fel
            match e.downcast_ref::<AppError>() {
                Some(app_err) if !app_err.is_transient() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
