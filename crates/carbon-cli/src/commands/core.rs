//! Shared utilities for commands
//!
//! This module contains:
//! - `open_store` - Open the entry/goal store
//! - `load_factors` - Load the emission factor table
//! - `parse_date` / `parse_month` - Argument parsing helpers
//! - `parse_usage` / `prompt_usage` - Collect raw usage for a new entry
//! - `cmd_factors` - Show the factor table

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use carbon_core::{Category, Error, FactorTable, JsonStore};
use chrono::NaiveDate;

/// Open the JSON store in `data_dir`, or the platform default location
pub fn open_store(data_dir: Option<&Path>) -> Result<JsonStore> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => JsonStore::default_dir()
            .context("Could not determine a data directory; pass --data-dir")?,
    };
    tracing::debug!(path = %dir.display(), "Opening store");
    JsonStore::new(&dir).with_context(|| format!("Failed to open store at {}", dir.display()))
}

/// Load factors from an explicit config, the user override, or built-ins
pub fn load_factors(path: Option<&Path>) -> Result<FactorTable> {
    match path {
        Some(path) => FactorTable::with_config_path(path)
            .with_context(|| format!("Failed to load factors from {}", path.display())),
        None => FactorTable::new().context("Failed to load emission factors"),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", raw))
}

/// Parse `YYYY-MM` into (year, month)
pub fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let invalid = || anyhow::anyhow!("Invalid month '{}' (use YYYY-MM)", raw);

    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Parse `CATEGORY=VALUE` arguments
pub fn parse_usage(args: &[String]) -> Result<Vec<(String, f64)>> {
    args.iter()
        .map(|arg| -> Result<(String, f64)> {
            let (name, value) = arg.split_once('=').ok_or_else(|| {
                Error::InvalidInput(format!("expected CATEGORY=VALUE, got '{}'", arg))
            })?;
            let value: f64 = value.trim().parse().map_err(|_| {
                Error::InvalidInput(format!("usage for {} is not a number: '{}'", name, value))
            })?;
            Ok((name.trim().to_string(), value))
        })
        .collect()
}

/// Ask for each category's usage in turn.
///
/// Blank answers (or end of input) skip the category; anything that isn't a
/// number aborts without creating an entry.
pub fn prompt_usage<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Vec<(String, f64)>> {
    let mut usage = Vec::new();

    for category in Category::all() {
        write!(
            output,
            "Enter {} usage ({}): ",
            category.as_str(),
            category.unit()
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }

        let value: f64 = answer.parse().map_err(|_| {
            Error::InvalidInput(format!(
                "usage for {} is not a number: '{}'",
                category, answer
            ))
        })?;
        usage.push((category.as_str().to_string(), value));
    }

    Ok(usage)
}

pub fn cmd_factors(factors: &FactorTable) -> Result<()> {
    println!();
    println!("⚙️  Emission Factors");
    println!("   ─────────────────────────────────────────────");
    println!("   {:15} │ {:>8} │ {}", "Category", "kg CO2", "Per");
    println!("   ────────────────┼──────────┼────────────────");
    for (category, factor) in factors.iter() {
        println!(
            "   {:15} │ {:>8.3} │ {}",
            category.as_str(),
            factor,
            category.unit()
        );
    }
    println!();
    println!("   Unknown categories: {:?}", factors.policy());
    Ok(())
}
