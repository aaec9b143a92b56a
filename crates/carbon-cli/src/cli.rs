//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Carbon - Track the footprint of everyday resource use
#[derive(Parser)]
#[command(name = "carbon")]
#[command(about = "Personal carbon footprint ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding entries.json and goals.json
    ///
    /// Defaults to the platform data directory (~/.local/share/carbon on Linux).
    #[arg(long, global = true, env = "CARBON_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Emission factor config (TOML)
    ///
    /// Defaults to ~/.local/share/carbon/config/factors.toml when present,
    /// otherwise the built-in factors.
    #[arg(long, global = true)]
    pub factors: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a new entry
    ///
    /// Pass usage as CATEGORY=VALUE pairs (e.g. electricity=12.5 transportation=30).
    /// With no pairs, prompts for each category; leave an answer blank to skip it.
    Add {
        /// Usage values as CATEGORY=VALUE
        usage: Vec<String>,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recent entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show an emissions summary
    Summary {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the report for one month
    Monthly {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show total emissions per day
    Daily,

    /// Show the recent emissions trend
    Trend {
        /// Number of trailing entries to consider
        #[arg(short, long, default_value = "7")]
        window: usize,
    },

    /// Show the highest-emission day
    Peak,

    /// Suggest ways to cut the dominant emission source
    Recommend,

    /// Show trend, peak, and advice together
    Insights {
        /// Number of trailing entries for the trend
        #[arg(short, long, default_value = "7")]
        window: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage reduction goals (set, list, progress)
    Goal {
        #[command(subcommand)]
        action: Option<GoalAction>,
    },

    /// Export entries as flat rows
    Export {
        /// Output format: csv, json (guessed from --output when omitted)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import entries from an exported CSV/JSON file
    Import {
        /// File to import
        #[arg(short, long)]
        file: PathBuf,

        /// Input format: csv, json (guessed from the file extension when omitted)
        #[arg(long)]
        format: Option<String>,
    },

    /// Print the per-category emissions series for plotting
    Series {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the emission factor table in use
    Factors,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Set a reduction goal for a category
    Set {
        /// Category (electricity, transportation, heating, waste, water, food, electronics)
        category: String,

        /// Target average emissions (kg CO2 per entry)
        #[arg(short, long)]
        target: f64,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        by: String,
    },

    /// List goals
    List,

    /// Show progress toward every goal
    Progress,
}
