//! Carbon CLI - Personal carbon footprint ledger
//!
//! Usage:
//!   carbon add electricity=12 transportation=30   Log an entry
//!   carbon summary --from 2024-01-01              Summarize emissions
//!   carbon goal set electricity --target 4 --by 2024-12-31
//!   carbon export --output entries.csv            Export flat rows

mod cli;
mod commands;


use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr).compact())
        .init();

    let store = commands::open_store(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Add { usage, date } => {
            let factors = commands::load_factors(cli.factors.as_deref())?;
            let date = date.as_deref().map(commands::parse_date).transpose()?;
            let usage = if usage.is_empty() {
                commands::prompt_usage(io::stdin().lock(), io::stdout())?
            } else {
                commands::parse_usage(&usage)?
            };
            commands::cmd_add(&store, &factors, date, usage).map(|_| ())
        }
        Commands::List { limit } => commands::cmd_list(&store, limit),
        Commands::Summary { from, to, json } => {
            let window = commands::resolve_window(from.as_deref(), to.as_deref())?;
            commands::cmd_summary(&store, window, json)
        }
        Commands::Monthly { month, json } => {
            let month = month.as_deref().map(commands::parse_month).transpose()?;
            commands::cmd_monthly(&store, month, json)
        }
        Commands::Daily => commands::cmd_daily(&store),
        Commands::Trend { window } => commands::cmd_trend(&store, window),
        Commands::Peak => commands::cmd_peak(&store),
        Commands::Recommend => commands::cmd_recommend(&store),
        Commands::Insights { window, json } => commands::cmd_insights(&store, window, json),
        Commands::Goal { action } => match action {
            Some(GoalAction::Set {
                category,
                target,
                by,
            }) => {
                let by = commands::parse_date(&by)?;
                commands::cmd_goal_set(&store, &category, target, by).map(|_| ())
            }
            Some(GoalAction::List) => commands::cmd_goal_list(&store),
            Some(GoalAction::Progress) | None => commands::cmd_goal_progress(&store),
        },
        Commands::Export { format, output } => {
            let format = commands::resolve_format(format.as_deref(), output.as_deref())?;
            commands::cmd_export(&store, format, output.as_deref())
        }
        Commands::Import { file, format } => {
            let factors = commands::load_factors(cli.factors.as_deref())?;
            let format = commands::resolve_format(format.as_deref(), Some(file.as_path()))?;
            commands::cmd_import(&store, &factors, &file, format).map(|_| ())
        }
        Commands::Series { json } => commands::cmd_series(&store, json),
        Commands::Factors => {
            let factors = commands::load_factors(cli.factors.as_deref())?;
            commands::cmd_factors(&factors)
        }
    }
}
