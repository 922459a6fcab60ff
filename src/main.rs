//! capgate - capability-based privilege delegation.
//!
//! Resolves the caller against an ordered role policy and either
//! executes the requested command under the resolved capability set, or
//! (with -i) explains what the caller could do.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use capgate::cli::Cli;
use capgate::config::Config;
use capgate::error::AppError;
use capgate::exec::{launch, LoggingApplier};
use capgate::identity::current_principal;
use capgate::render::render;
use capgate_policy::{explain, resolve};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            eprintln!("capgate: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    // Fresh policy snapshot per invocation; config edits are file swaps.
    let config = Config::load(&cli.config)?;
    let document = config.document()?;
    let who = current_principal()?;

    if cli.info {
        // Explain mode reports and exits 0, even for unusable roles.
        let report = explain(&document, &who, cli.role.as_deref(), cli.command.as_deref());
        print!("{}", render(&report, &who));
        return Ok(());
    }

    let grant = resolve(&document, &who, cli.role.as_deref(), cli.command.as_deref())?;
    info!(
        user = %who.username,
        role = %grant.role.name,
        command = cli.command.as_deref().unwrap_or("<shell>"),
        "authorization granted"
    );

    // launch only returns on failure; on success the process is replaced.
    Err(AppError::Exec(launch(
        &config.general.shell,
        cli.command.as_deref(),
        &grant,
        None,
        &LoggingApplier,
    )))
}
