//! Insight Engine - trends, peaks, and reduction advice
//!
//! Analyzers are pure functions over a snapshot of entries:
//!
//! - **Trend** - mean change in total emissions over a trailing window
//! - **Peak** - the entry with the highest total
//! - **Dominant category** - highest mean emissions, with advice to cut it
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carbon_core::insights::{analyze, DEFAULT_TREND_WINDOW};
//!
//! let entries = store.load()?;
//! let report = analyze(&entries, DEFAULT_TREND_WINDOW)?;
//! ```

pub mod engine;
pub mod recommendations;
pub mod trend;

pub use engine::{analyze, InsightReport};
pub use recommendations::{category_means, dominant_category, recommend};
pub use trend::{peak_day, recent_trend, TrendDirection, DEFAULT_TREND_WINDOW};
