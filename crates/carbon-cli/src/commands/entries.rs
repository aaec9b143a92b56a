//! Entry command implementations (add, list, export, import)

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use carbon_core::{
    build_entry, export_entries, import_entries, Entry, EntryStore, ExportFormat, FactorTable,
};
use chrono::NaiveDate;

/// Build an entry from raw usage and append it to the store
pub fn cmd_add(
    store: &impl EntryStore,
    factors: &FactorTable,
    date: Option<NaiveDate>,
    usage: Vec<(String, f64)>,
) -> Result<Entry> {
    let entry = build_entry(factors, date, usage)?;

    let mut entries = store.load().context("Failed to load entries")?;
    entries.push(entry.clone());
    store.save(&entries).context("Failed to save entries")?;

    println!();
    println!("✅ Entry added for {}", entry.date);
    for (category, value) in &entry.emissions {
        println!("   {:15} {:>10.2} kg CO2", category.as_str(), value);
    }
    let skipped: Vec<&str> = entry
        .inputs
        .keys()
        .filter(|name| name.parse::<carbon_core::Category>().is_err())
        .map(String::as_str)
        .collect();
    if !skipped.is_empty() {
        println!("   \x1b[2mNo factor for: {}\x1b[0m", skipped.join(", "));
    }
    println!(
        "   Total emissions for this entry: {:.2} kg CO2",
        entry.total_emissions
    );

    Ok(entry)
}

pub fn cmd_list(store: &impl EntryStore, limit: usize) -> Result<()> {
    let mut entries = store.load().context("Failed to load entries")?;
    entries.sort_by_key(|e| e.date);

    println!();
    println!("📒 Entries");
    println!("   ─────────────────────────────────────────────────────────────");

    if entries.is_empty() {
        println!("   No entries recorded yet. Add one with: carbon add electricity=10");
        return Ok(());
    }

    let start = entries.len().saturating_sub(limit);
    println!("   {:10} │ {:>10} │ Inputs", "Date", "kg CO2");
    println!("   ───────────┼────────────┼──────────────────────────────────────");
    for entry in &entries[start..] {
        let inputs: Vec<String> = entry
            .inputs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        println!(
            "   {:10} │ {:>10.2} │ {}",
            entry.date,
            entry.total_emissions,
            inputs.join(" ")
        );
    }

    if start > 0 {
        println!("   ... {} older entries not shown", start);
    }

    Ok(())
}

/// Resolve an explicit format string, falling back to the file extension
pub fn resolve_format(format: Option<&str>, path: Option<&Path>) -> Result<ExportFormat> {
    let format = match (format, path) {
        (Some(f), _) => f.parse::<ExportFormat>()?,
        (None, Some(p)) => ExportFormat::from_path(p)?,
        (None, None) => ExportFormat::Csv,
    };
    Ok(format)
}

pub fn cmd_export(store: &impl EntryStore, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let mut entries = store.load().context("Failed to load entries")?;
    entries.sort_by_key(|e| e.date);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export_entries(&entries, format, BufWriter::new(file))?;
            eprintln!(
                "📤 Exported {} entries to {} ({})",
                entries.len(),
                path.display(),
                format
            );
        }
        None => {
            let stdout = io::stdout();
            export_entries(&entries, format, stdout.lock())?;
        }
    }

    Ok(())
}

/// Import entries and append them to the store; returns how many were added
pub fn cmd_import(
    store: &impl EntryStore,
    factors: &FactorTable,
    file: &Path,
    format: ExportFormat,
) -> Result<usize> {
    let reader = File::open(file)
        .with_context(|| format!("Failed to open file: {}", file.display()))?;
    let imported = import_entries(BufReader::new(reader), format, factors)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    let count = imported.len();
    let mut entries = store.load().context("Failed to load entries")?;
    entries.extend(imported);
    store.save(&entries).context("Failed to save entries")?;

    println!("📥 Imported {} entries from {}", count, file.display());
    Ok(count)
}
