//! Laurel CLI - hackathon certificate generation
//!
//! ## Quick Start
//!
//! ```bash
//! # Assign certificate IDs to every roster
//! laurel assign-ids
//!
//! # Generate a participation certificate
//! laurel generate --role participant --name "Asha Roy" --team "Byte Busters"
//! ```

#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

use std::process::ExitCode;

use clap::Parser;

mod commands;

use commands::{Cli, Command};

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => commands::generate::run(&cli.config, args),
        Command::AssignIds(args) => commands::assign_ids::run(&cli.config, args),
        Command::Roster(args) => commands::roster::run(&cli.config, args),
        Command::Config(args) => commands::config::run(&cli.config, args),
        Command::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// Print an error and map it to an exit code: 2 for user-correctable input
/// problems, 1 for everything else.
fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("error: {err:#}");
    let user_correctable = err
        .downcast_ref::<laurel_core::Error>()
        .is_some_and(laurel_core::Error::is_user_correctable);
    if user_correctable {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,laurel=info,laurel_core=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
