//! Export and import of entries as flat tabular rows
//!
//! Supports:
//! - CSV export (one row per entry)
//! - JSON export (array of flat objects, same keys as the CSV columns)
//! - CSV/JSON import, rebuilding each entry from its `input_*` columns
//!
//! Columns are `date`, `total`, then `input_<name>` for every raw input name
//! seen in any entry (sorted), then `emissions_<category>` for every category
//! with emissions (category order). Cells for values an entry lacks are
//! empty in CSV and omitted in JSON.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::entry::build_entry;
use crate::error::{Error, Result};
use crate::factors::FactorTable;
use crate::models::{Category, Entry};

const INPUT_PREFIX: &str = "input_";
const EMISSIONS_PREFIX: &str = "emissions_";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("no file extension on {}", path.display()))
            })?;
        ext.parse()
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry flattened into named columns
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub date: NaiveDate,
    pub total: f64,
    /// Values keyed by column name (`input_*` / `emissions_*`)
    pub values: BTreeMap<String, f64>,
}

/// Entries flattened into a table with a shared column set
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<FlatRow>,
}

fn input_column(name: &str) -> String {
    format!("{}{}", INPUT_PREFIX, name)
}

fn emissions_column(category: Category) -> String {
    format!("{}{}", EMISSIONS_PREFIX, category.as_str())
}

/// Flatten entries into one row each
pub fn flatten(entries: &[Entry]) -> FlatTable {
    let input_names: BTreeSet<&str> = entries
        .iter()
        .flat_map(|e| e.inputs.keys().map(String::as_str))
        .collect();
    let categories: BTreeSet<Category> = entries
        .iter()
        .flat_map(|e| e.emissions.keys().copied())
        .collect();

    let mut columns = vec!["date".to_string(), "total".to_string()];
    columns.extend(input_names.iter().map(|n| input_column(n)));
    columns.extend(categories.iter().map(|&c| emissions_column(c)));

    let rows = entries
        .iter()
        .map(|e| {
            let mut values = BTreeMap::new();
            for (name, &value) in &e.inputs {
                values.insert(input_column(name), value);
            }
            for (&category, &value) in &e.emissions {
                values.insert(emissions_column(category), value);
            }
            FlatRow {
                date: e.date,
                total: e.total_emissions,
                values,
            }
        })
        .collect();

    FlatTable { columns, rows }
}

/// Write entries in the given format
pub fn export_entries<W: Write>(entries: &[Entry], format: ExportFormat, writer: W) -> Result<()> {
    let table = flatten(entries);
    let written = match format {
        ExportFormat::Csv => write_csv(&table, writer),
        ExportFormat::Json => write_json(&table, writer),
    };
    written?;
    tracing::debug!(rows = entries.len(), format = format.as_str(), "Exported entries");
    Ok(())
}

fn write_csv<W: Write>(table: &FlatTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(table.columns.len());
        record.push(row.date.format(DATE_FORMAT).to_string());
        record.push(row.total.to_string());
        for column in &table.columns[2..] {
            record.push(
                row.values
                    .get(column)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write>(table: &FlatTable, mut writer: W) -> Result<()> {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            let mut obj = Map::new();
            obj.insert(
                "date".to_string(),
                Value::String(row.date.format(DATE_FORMAT).to_string()),
            );
            obj.insert("total".to_string(), Value::from(row.total));
            for (column, &value) in &row.values {
                obj.insert(column.clone(), Value::from(value));
            }
            Value::Object(obj)
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

fn parse_date(raw: &str, row: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        Error::InvalidInput(format!(
            "row {}: invalid date '{}' (use YYYY-MM-DD)",
            row, raw
        ))
    })
}

/// Read entries back from exported rows.
///
/// Only `date` and `input_*` columns are read; emissions are recomputed
/// with `factors`, so an import also recalibrates old data.
pub fn import_entries<R: Read>(
    reader: R,
    format: ExportFormat,
    factors: &FactorTable,
) -> Result<Vec<Entry>> {
    let entries = match format {
        ExportFormat::Csv => read_csv(reader, factors),
        ExportFormat::Json => read_json(reader, factors),
    }?;
    tracing::debug!(rows = entries.len(), format = format.as_str(), "Imported entries");
    Ok(entries)
}

fn read_csv<R: Read>(reader: R, factors: &FactorTable) -> Result<Vec<Entry>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let date_idx = headers
        .iter()
        .position(|h| h.trim() == "date")
        .ok_or_else(|| Error::InvalidData("CSV has no 'date' column".to_string()))?;
    let input_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            h.trim()
                .strip_prefix(INPUT_PREFIX)
                .map(|name| (i, name.to_string()))
        })
        .collect();

    let mut entries = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;
        let date = parse_date(record.get(date_idx).unwrap_or_default(), row)?;

        let mut inputs = Vec::with_capacity(input_cols.len());
        for (col, name) in &input_cols {
            let cell = record.get(*col).unwrap_or_default().trim();
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| {
                Error::InvalidInput(format!("row {}: {} is not a number: '{}'", row, name, cell))
            })?;
            inputs.push((name.as_str(), value));
        }

        entries.push(build_entry(factors, Some(date), inputs)?);
    }

    Ok(entries)
}

fn read_json<R: Read>(reader: R, factors: &FactorTable) -> Result<Vec<Entry>> {
    let rows: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;

    let mut entries = Vec::with_capacity(rows.len());
    for (idx, obj) in rows.iter().enumerate() {
        let row = idx + 1;
        let raw_date = obj
            .get("date")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidInput(format!("row {}: missing 'date'", row)))?;
        let date = parse_date(raw_date, row)?;

        let mut inputs = Vec::new();
        for (key, value) in obj {
            let Some(name) = key.strip_prefix(INPUT_PREFIX) else {
                continue;
            };
            let value = value.as_f64().ok_or_else(|| {
                Error::InvalidInput(format!("row {}: {} is not a number", row, name))
            })?;
            inputs.push((name, value));
        }

        entries.push(build_entry(factors, Some(date), inputs)?);
    }

    Ok(entries)
}
