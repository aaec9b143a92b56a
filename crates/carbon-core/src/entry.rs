//! Entry builder: raw usage to per-category emissions

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::factors::{FactorTable, UnknownCategoryPolicy};
use crate::models::{Category, Entry};

/// Build an entry from raw usage values.
///
/// Known categories get `value * factor`; names without a factor are kept in
/// `inputs` and either skipped or rejected depending on the table's policy.
/// A missing date means today (local clock).
pub fn build_entry<I, S>(factors: &FactorTable, date: Option<NaiveDate>, inputs: I) -> Result<Entry>
where
    I: IntoIterator<Item = (S, f64)>,
    S: AsRef<str>,
{
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut raw = BTreeMap::new();
    let mut emissions = BTreeMap::new();

    for (name, value) in inputs {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("usage name is empty".to_string()));
        }
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "usage for {} is not a finite number",
                name
            )));
        }

        match name.parse::<Category>() {
            Ok(category) => {
                let emission = value * factors.factor_for(category);
                if !emission.is_finite() {
                    return Err(Error::InvalidInput(format!(
                        "emissions for {} overflow ({} * {})",
                        category,
                        value,
                        factors.factor_for(category)
                    )));
                }
                raw.insert(category.as_str().to_string(), value);
                emissions.insert(category, emission);
            }
            Err(err) => match factors.policy() {
                UnknownCategoryPolicy::Reject => return Err(err),
                UnknownCategoryPolicy::Ignore => {
                    tracing::debug!(category = name, "No emission factor, keeping raw input only");
                    raw.insert(name.to_string(), value);
                }
            },
        }
    }

    let total_emissions = emissions.values().fold(0.0, |acc, v| acc + v);
    if !total_emissions.is_finite() {
        return Err(Error::InvalidInput("total emissions overflow".to_string()));
    }

    Ok(Entry {
        date,
        inputs: raw,
        emissions,
        total_emissions,
    })
}
