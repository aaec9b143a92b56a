//! Emission factor table
//!
//! Maps each [`Category`] to kg CO2 per unit of raw usage.
//!
//! ## Configuration Resolution
//!
//! The table is loaded with a two-layer resolution:
//! 1. Check for an override (explicit path, else
//!    ~/.local/share/carbon/config/factors.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Category;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/factors.toml");

/// How usage names without a factor are handled when building entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Keep the raw input, contribute no emissions
    #[default]
    Ignore,
    /// Fail with [`Error::UnknownCategory`]
    Reject,
}

/// Per-category emission factors plus the unknown-category policy
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    factors: BTreeMap<Category, f64>,
    policy: UnknownCategoryPolicy,
}

impl Default for FactorTable {
    fn default() -> Self {
        let factors = Category::all()
            .iter()
            .map(|&c| (c, default_factor(c)))
            .collect();
        Self {
            factors,
            policy: UnknownCategoryPolicy::default(),
        }
    }
}

/// Built-in factor for a category (kg CO2 per unit)
fn default_factor(category: Category) -> f64 {
    match category {
        Category::Electricity => 0.4,
        Category::Transportation => 0.2,
        Category::Heating => 0.2,
        Category::Waste => 0.5,
        Category::Water => 0.3,
        Category::Food => 1.2,
        Category::Electronics => 0.8,
    }
}

impl FactorTable {
    /// Load the table from the user override location or embedded defaults
    pub fn new() -> Result<Self> {
        load_config(None)
    }

    /// Load the table from a specific override file
    pub fn with_config_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a table from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Replace one factor, for calibration
    pub fn with_factor(mut self, category: Category, factor: f64) -> Result<Self> {
        validate_factor(category.as_str(), factor)?;
        self.factors.insert(category, factor);
        Ok(self)
    }

    pub fn with_policy(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnknownCategoryPolicy {
        self.policy
    }

    /// Look up the factor for a category name
    pub fn factor(&self, name: &str) -> Result<f64> {
        let category: Category = name.parse()?;
        Ok(self.factor_for(category))
    }

    /// Factor for a known category
    pub fn factor_for(&self, category: Category) -> f64 {
        self.factors
            .get(&category)
            .copied()
            .unwrap_or_else(|| default_factor(category))
    }

    /// Iterate factors in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.factors.iter().map(|(&c, &f)| (c, f))
    }
}

fn validate_factor(name: &str, factor: f64) -> Result<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Emission factor for {} must be a positive number, got {}",
            name, factor
        )));
    }
    Ok(())
}

/// Get the default override config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("carbon").join("config").join("factors.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<FactorTable> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading emission factors");
            fs::read_to_string(&path)
                .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))?
        }
        Some(path) if override_path.is_some() => {
            tracing::warn!(
                path = %path.display(),
                "Factor config not found, using built-in defaults"
            );
            DEFAULT_CONFIG.to_string()
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    factors: Option<HashMap<String, f64>>,
    policy: Option<RawPolicy>,
}

#[derive(Debug, Deserialize)]
struct RawPolicy {
    unknown_categories: Option<UnknownCategoryPolicy>,
}

fn parse_config(content: &str) -> Result<FactorTable> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid factor config TOML: {}", e)))?;

    let mut table = FactorTable::default();

    if let Some(factors) = raw.factors {
        for (name, factor) in factors {
            let category = match name.parse::<Category>() {
                Ok(category) => category,
                Err(_) => {
                    tracing::warn!(category = %name, "Skipping factor for unknown category");
                    continue;
                }
            };
            table = table.with_factor(category, factor)?;
        }
    }

    if let Some(policy) = raw.policy.and_then(|p| p.unknown_categories) {
        table.policy = policy;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factors() {
        let table = FactorTable::default();
        assert_eq!(table.factor_for(Category::Electricity), 0.4);
        assert_eq!(table.factor_for(Category::Transportation), 0.2);
        assert_eq!(table.factor_for(Category::Heating), 0.2);
        assert_eq!(table.factor_for(Category::Waste), 0.5);
        assert_eq!(table.factor_for(Category::Water), 0.3);
        assert_eq!(table.factor_for(Category::Food), 1.2);
        assert_eq!(table.factor_for(Category::Electronics), 0.8);
        assert_eq!(table.policy(), UnknownCategoryPolicy::Ignore);
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        let table = FactorTable::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(table, FactorTable::default());
    }

    #[test]
    fn test_factor_by_name() {
        let table = FactorTable::default();
        assert_eq!(table.factor("food").unwrap(), 1.2);
        assert!(matches!(
            table.factor("plastic"),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_partial_override() {
        let config = r#"
[factors]
electricity = 0.25

[policy]
unknown_categories = "reject"
"#;
        let table = FactorTable::from_toml(config).unwrap();
        assert_eq!(table.factor_for(Category::Electricity), 0.25);
        assert_eq!(table.factor_for(Category::Food), 1.2);
        assert_eq!(table.policy(), UnknownCategoryPolicy::Reject);
    }

    #[test]
    fn test_unknown_config_keys_skipped() {
        let config = "[factors]\nplastic = 3.0\nwaste = 0.6\n";
        let table = FactorTable::from_toml(config).unwrap();
        assert_eq!(table.factor_for(Category::Waste), 0.6);
        assert!(table.factor("plastic").is_err());
    }

    #[test]
    fn test_non_positive_factor_rejected() {
        let config = "[factors]\nheating = 0.0\n";
        assert!(matches!(
            FactorTable::from_toml(config),
            Err(Error::InvalidData(_))
        ));
        assert!(FactorTable::default()
            .with_factor(Category::Water, -1.0)
            .is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            FactorTable::from_toml("[factors\nbroken"),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_missing_override_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let table = FactorTable::with_config_path(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(table, FactorTable::default());
    }

    #[test]
    fn test_override_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors.toml");
        fs::write(&path, "[factors]\nfood = 2.5\n").unwrap();

        let table = FactorTable::with_config_path(&path).unwrap();
        assert_eq!(table.factor_for(Category::Food), 2.5);
    }
}
