//! Emission reports and aggregation
//!
//! Everything here is a pure function over a slice of entries. Windows are
//! inclusive on both ends, and averages are taken per entry rather than per
//! calendar day, so two entries sharing a date count twice.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{Category, DateRange, DayTotal, Entry, MonthlyReport, SeriesPoint, Summary};

/// Summarize all entries, or only those inside `window`.
///
/// Returns [`Error::EmptyDataset`] when nothing qualifies.
pub fn summarize(entries: &[Entry], window: Option<DateRange>) -> Result<Summary> {
    let selected: Vec<&Entry> = match window {
        Some(range) => entries.iter().filter(|e| range.contains(e.date)).collect(),
        None => entries.iter().collect(),
    };

    if selected.is_empty() {
        return Err(Error::EmptyDataset(match window {
            Some(range) => format!("no entries between {} and {}", range.from, range.to),
            None => "no entries recorded".to_string(),
        }));
    }

    let summary = summarize_selected(&selected, window);
    tracing::debug!(
        entries = summary.number_of_entries,
        total = summary.total_emissions,
        "Summary computed"
    );
    Ok(summary)
}

/// Aggregate a non-empty selection. Ties on highest/lowest keep the first
/// entry in input order.
fn summarize_selected(selected: &[&Entry], period: Option<DateRange>) -> Summary {
    let first = selected[0];
    let mut total = 0.0;
    let mut highest = first;
    let mut lowest = first;
    let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();

    for entry in selected {
        total += entry.total_emissions;
        if entry.total_emissions > highest.total_emissions {
            highest = entry;
        }
        if entry.total_emissions < lowest.total_emissions {
            lowest = entry;
        }
        for (&category, &value) in &entry.emissions {
            *by_category.entry(category).or_insert(0.0) += value;
        }
    }

    Summary {
        period,
        total_emissions: total,
        average_daily_emissions: total / selected.len() as f64,
        highest_emission_day: highest.date,
        lowest_emission_day: lowest.date,
        number_of_entries: selected.len(),
        by_category,
    }
}

/// First and last day of a calendar month
pub fn month_range(year: i32, month: u32) -> Result<DateRange> {
    let invalid = || Error::InvalidInput(format!("invalid month: {}-{:02}", year, month));

    let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let to = next.pred_opt().ok_or_else(invalid)?;

    DateRange::new(from, to)
}

/// Summary of one calendar month plus its highest-emitting day.
///
/// The highest day sums every entry sharing a date; ties go to the earlier
/// date.
pub fn monthly_report(entries: &[Entry], year: i32, month: u32) -> Result<MonthlyReport> {
    let range = month_range(year, month)?;
    let summary = summarize(entries, Some(range))?;

    let in_month: Vec<Entry> = entries
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .cloned()
        .collect();
    let days = daily_totals(&in_month);

    // summarize() above guarantees at least one day
    let mut highest_day = days[0];
    for day in &days[1..] {
        if day.total > highest_day.total {
            highest_day = *day;
        }
    }

    Ok(MonthlyReport {
        year,
        month,
        summary,
        highest_day,
    })
}

/// Total emissions per calendar day, ascending by date
pub fn daily_totals(entries: &[Entry]) -> Vec<DayTotal> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in entries {
        *days.entry(entry.date).or_insert(0.0) += entry.total_emissions;
    }
    days.into_iter()
        .map(|(date, total)| DayTotal { date, total })
        .collect()
}

/// Per-entry emissions ordered by date, for plotting.
///
/// Entries sharing a date keep their input order.
pub fn series(entries: &[Entry]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = entries
        .iter()
        .map(|e| SeriesPoint {
            date: e.date,
            emissions: e.emissions.clone(),
            total: e.total_emissions,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
