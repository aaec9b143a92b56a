//! Carbon Core Library
//!
//! Emissions engine for the carbon footprint ledger:
//! - Configurable emission factor table
//! - Entry builder (raw usage to kg CO2 per category)
//! - Aggregation over all-time, date windows, months, and days
//! - Insight engine (recent trend, peak day, dominant category, advice)
//! - Goal tracking with clamped progress
//! - JSON file store and CSV/JSON export
//!
//! The engine itself is pure: it works on entry snapshots passed in by the
//! caller and never touches the filesystem. [`store`] and [`export`] are the
//! I/O edges.

pub mod entry;
pub mod error;
pub mod export;
pub mod factors;
pub mod goals;
pub mod insights;
pub mod models;
pub mod reports;
pub mod store;

pub use entry::build_entry;
pub use error::{Error, Result};
pub use export::{export_entries, flatten, import_entries, ExportFormat, FlatRow, FlatTable};
pub use factors::{FactorTable, UnknownCategoryPolicy};
pub use goals::{average_emissions, progress, set_goal};
pub use insights::{
    analyze, dominant_category, peak_day, recent_trend, recommend, InsightReport, TrendDirection,
    DEFAULT_TREND_WINDOW,
};
pub use models::{
    Category, DateRange, DayTotal, Entry, Goal, GoalProgress, MonthlyReport, SeriesPoint, Summary,
};
pub use reports::{daily_totals, month_range, monthly_report, series, summarize};
pub use store::{EntryStore, JsonStore};
