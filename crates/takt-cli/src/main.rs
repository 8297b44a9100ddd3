use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, SubsecRound};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use takt_cli::commands::{cat, check, clear, commit, edit, import, summary};
use takt_cli::style::Painter;
use takt_cli::{Cli, Commands, Config};
use takt_core::Period;
use takt_store::RecordStore;

/// Current local wall-clock time, truncated to whole seconds.
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let store = RecordStore::new(&config.file);
    let painter = Painter::new(config.color_enabled());
    let mut stdout = io::stdout().lock();

    let summary_options = |period: Period, head: Option<usize>| summary::SummaryOptions {
        period,
        limit: head.unwrap_or(config.summary_limit),
        style: config.duration_style,
    };

    match command {
        Commands::Check { notes } => {
            check::run(&mut stdout, &store, notes, now(), painter)?;
        }
        Commands::Cat { head } => cat::run(&mut stdout, &store, *head, painter)?,
        Commands::Clear => clear::run(&mut stdout, &store, painter)?,
        Commands::Edit => edit::run(&mut stdout, &store, &config.editor(), painter)?,
        Commands::Import { source } => import::run(&mut stdout, &store, source, painter)?,
        Commands::Commit { message } => {
            let message = message.as_deref().unwrap_or(&config.commit_message);
            commit::run(&mut stdout, &config.file, message, painter)?;
        }
        Commands::Day { head } => {
            let options = summary_options(Period::Day, *head);
            summary::run(&mut stdout, &store, options, now(), painter)?;
        }
        Commands::Week { head } => {
            let options = summary_options(Period::Week, *head);
            summary::run(&mut stdout, &store, options, now(), painter)?;
        }
        Commands::Month { head } => {
            let options = summary_options(Period::Month, *head);
            summary::run(&mut stdout, &store, options, now(), painter)?;
        }
        Commands::Year { head } => {
            let options = summary_options(Period::Year, *head);
            summary::run(&mut stdout, &store, options, now(), painter)?;
        }
    }

    stdout.flush()?;
    Ok(())
}
