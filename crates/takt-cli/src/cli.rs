//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line time tracking.
///
/// Check in when you start working, check out when you stop, and ask for
/// daily, weekly, monthly or yearly totals.
#[derive(Debug, Parser)]
#[command(name = "takt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
///
/// This enum is the full command registry; nothing is discovered at runtime.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check in or out.
    #[command(visible_alias = "c")]
    Check {
        /// Notes saved with the record.
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Show all records.
    #[command(visible_aliases = ["display", "d"])]
    Cat {
        /// Show only the first HEAD records.
        head: Option<usize>,
    },

    /// Daily summary.
    #[command(visible_aliases = ["summary", "s"])]
    Day {
        /// Show at most HEAD rows (0 shows all).
        head: Option<usize>,
    },

    /// Week to date summary.
    #[command(visible_aliases = ["wtd", "w"])]
    Week {
        /// Show at most HEAD rows (0 shows all).
        head: Option<usize>,
    },

    /// Month to date summary.
    #[command(visible_aliases = ["mtd", "m"])]
    Month {
        /// Show at most HEAD rows (0 shows all).
        head: Option<usize>,
    },

    /// Year to date summary.
    #[command(visible_aliases = ["ytd", "y"])]
    Year {
        /// Show at most HEAD rows (0 shows all).
        head: Option<usize>,
    },

    /// Remove all records.
    Clear,

    /// Edit the records file.
    #[command(visible_alias = "e")]
    Edit,

    /// Import records from another CSV file.
    Import {
        /// CSV file with `timestamp,kind,notes` rows.
        source: PathBuf,
    },

    /// Commit the records file if it lives in a git repository.
    #[command(visible_aliases = ["sync", "cm"])]
    Commit {
        /// Commit message (defaults to the configured one).
        message: Option<String>,
    },
}
