//! BuildingHub CLI entry point.

use std::error::Error;
use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use buildinghub::cli::{Cli, Commands};
use buildinghub::commands;
use buildinghub::tui;
use buildinghub_core::{load_env_files, Settings};

fn main() {
    // .env.local may set the backend URL and timeout
    load_env_files();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = settings(&cli)?;
    init_tracing(&cli, &settings)?;

    match cli.command {
        Some(Commands::Tui { role }) => tui::run(settings, role)?,
        None => tui::run(settings, None)?,
        Some(cmd) => commands::execute(cmd, &settings)?,
    }
    Ok(())
}

/// Environment settings with command-line overrides applied.
fn settings(cli: &Cli) -> Result<Settings, Box<dyn Error>> {
    Ok(cli.apply_overrides(Settings::from_env()?)?)
}

/// The TUI owns the terminal, so it logs to a file instead of stderr.
fn init_tracing(cli: &Cli, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    if cli.is_tui() {
        settings.ensure_dirs()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(settings.log_file())?;
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
