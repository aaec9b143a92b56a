//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_store, load_factors, argument parsing) and `factors`
//! - `entries` - Entry commands (add, list, export, import)
//! - `goals` - Goal commands (set, list, progress)
//! - `reports` - Report commands (summary, monthly, daily, trend, peak, recommend, series)

pub mod core;
pub mod entries;
pub mod goals;
pub mod reports;

// Re-export command functions for main.rs
pub use core::*;
pub use entries::*;
pub use goals::*;
pub use reports::*;
