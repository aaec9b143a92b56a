//! Insight report - bundles trend, peak, and advice for one snapshot

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Category, DayTotal, Entry};

use super::recommendations::{dominant_category, recommend};
use super::trend::{peak_day, recent_trend, TrendDirection};

/// Everything the insight engine can say about a set of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Mean change in total emissions over the trailing window
    pub trend: f64,
    pub direction: TrendDirection,
    pub window_size: usize,
    pub peak: DayTotal,
    pub dominant_category: Category,
    pub recommendations: Vec<String>,
}

/// Run every insight over an immutable snapshot of entries.
///
/// Fails with `EmptyDataset` when there is nothing to analyze.
pub fn analyze(entries: &[Entry], window_size: usize) -> Result<InsightReport> {
    let peak = peak_day(entries)?;
    let dominant = dominant_category(entries)?;
    let trend = recent_trend(entries, window_size);

    tracing::debug!(
        trend,
        dominant = dominant.as_str(),
        "Insight analysis complete"
    );

    Ok(InsightReport {
        trend,
        direction: TrendDirection::from_delta(trend),
        window_size,
        peak,
        dominant_category: dominant,
        recommendations: recommend(dominant).iter().map(|s| s.to_string()).collect(),
    })
}
