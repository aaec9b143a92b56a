//! Trend and peak detection over total emissions

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{DayTotal, Entry};

/// Number of trailing entries used by default for the recent trend
pub const DEFAULT_TREND_WINDOW: usize = 7;

/// Below this magnitude a trend is reported as steady
const STEADY_EPSILON: f64 = 1e-9;

/// Direction of a trend delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Steady,
}

impl TrendDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > STEADY_EPSILON {
            Self::Rising
        } else if delta < -STEADY_EPSILON {
            Self::Falling
        } else {
            Self::Steady
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Steady => "steady",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mean entry-to-entry change in total emissions over the last
/// `window_size` entries (by date).
///
/// Returns 0.0 when fewer than two entries fall in the window.
pub fn recent_trend(entries: &[Entry], window_size: usize) -> f64 {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let start = sorted.len().saturating_sub(window_size);
    let window = &sorted[start..];
    if window.len() < 2 {
        return 0.0;
    }

    let change = window
        .windows(2)
        .map(|pair| pair[1].total_emissions - pair[0].total_emissions)
        .fold(0.0, |acc, d| acc + d);

    change / (window.len() - 1) as f64
}

/// Entry with the highest total; ties go to the first in input order
pub fn peak_day(entries: &[Entry]) -> Result<DayTotal> {
    let mut iter = entries.iter();
    let first = iter
        .next()
        .ok_or_else(|| Error::EmptyDataset("no entries to find a peak in".to_string()))?;

    let peak = iter.fold(first, |best, e| {
        if e.total_emissions > best.total_emissions {
            e
        } else {
            best
        }
    });

    Ok(DayTotal {
        date: peak.date,
        total: peak.total_emissions,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    fn entry(day: u32, total: f64) -> Entry {
        Entry {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            inputs: BTreeMap::new(),
            emissions: BTreeMap::new(),
            total_emissions: total,
        }
    }

    #[test]
    fn test_trend_increasing_is_positive() {
        let entries: Vec<Entry> = (1..=5).map(|d| entry(d, d as f64 * 2.0)).collect();
        let trend = recent_trend(&entries, DEFAULT_TREND_WINDOW);
        assert!(trend > 0.0);
        assert_eq!(trend, 2.0);
    }

    #[test]
    fn test_trend_constant_is_zero() {
        let entries: Vec<Entry> = (1..=10).map(|d| entry(d, 3.3)).collect();
        assert_eq!(recent_trend(&entries, DEFAULT_TREND_WINDOW), 0.0);
    }

    #[test]
    fn test_trend_sorts_by_date_first() {
        let entries = vec![entry(3, 1.0), entry(1, 9.0), entry(2, 5.0)];
        assert_eq!(recent_trend(&entries, 7), -4.0);
    }

    #[test]
    fn test_trend_uses_trailing_window() {
        // Falls sharply early on, then rises by 1 per entry
        let mut entries = vec![entry(1, 100.0), entry(2, 0.0)];
        entries.extend((3..=6).map(|d| entry(d, (d - 2) as f64)));
        assert_eq!(recent_trend(&entries, 4), 1.0);
    }

    #[test]
    fn test_trend_too_few_entries() {
        assert_eq!(recent_trend(&[], 7), 0.0);
        assert_eq!(recent_trend(&[entry(1, 4.0)], 7), 0.0);
        assert_eq!(recent_trend(&[entry(1, 4.0), entry(2, 8.0)], 1), 0.0);
    }

    #[test]
    fn test_trend_direction() {
        assert_eq!(TrendDirection::from_delta(0.5), TrendDirection::Rising);
        assert_eq!(TrendDirection::from_delta(-0.5), TrendDirection::Falling);
        assert_eq!(TrendDirection::from_delta(0.0), TrendDirection::Steady);
    }

    #[test]
    fn test_peak_day_first_wins_ties() {
        let entries = vec![entry(4, 2.0), entry(2, 9.0), entry(1, 9.0)];
        let peak = peak_day(&entries).unwrap();
        assert_eq!(peak.date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(peak.total, 9.0);
    }

    #[test]
    fn test_peak_day_empty() {
        assert!(matches!(peak_day(&[]), Err(Error::EmptyDataset(_))));
    }
}
