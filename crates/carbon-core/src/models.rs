//! Domain models for the carbon ledger

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Resource-usage categories with a known emission factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Household electricity, in kWh
    Electricity,
    /// Distance travelled, in km
    Transportation,
    /// Natural gas burned for heating, in m³
    Heating,
    /// Waste produced, in kg
    Waste,
    /// Water consumed, in m³
    Water,
    /// Food consumed, in kg
    Food,
    /// Device usage, in hours
    Electronics,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Transportation => "transportation",
            Self::Heating => "heating",
            Self::Waste => "waste",
            Self::Water => "water",
            Self::Food => "food",
            Self::Electronics => "electronics",
        }
    }

    /// Unit the raw usage value is expected in
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Electricity => "kWh",
            Self::Transportation => "km",
            Self::Heating => "m³",
            Self::Waste => "kg",
            Self::Water => "m³",
            Self::Food => "kg",
            Self::Electronics => "hours",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [Category] {
        &[
            Self::Electricity,
            Self::Transportation,
            Self::Heating,
            Self::Waste,
            Self::Water,
            Self::Food,
            Self::Electronics,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electricity" => Ok(Self::Electricity),
            "transportation" => Ok(Self::Transportation),
            "heating" => Ok(Self::Heating),
            "waste" => Ok(Self::Waste),
            "water" => Ok(Self::Water),
            "food" => Ok(Self::Food),
            "electronics" => Ok(Self::Electronics),
            _ => Err(Error::UnknownCategory(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One dated record of usage inputs and their derived emissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    /// Raw usage by name, including names with no known factor
    pub inputs: BTreeMap<String, f64>,
    /// kg CO2 per known category
    pub emissions: BTreeMap<Category, f64>,
    pub total_emissions: f64,
}

impl Entry {
    /// Emissions recorded for a category, if the entry has any
    pub fn emission(&self, category: Category) -> Option<f64> {
        self.emissions.get(&category).copied()
    }
}

/// A reduction target for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub category: Category,
    pub target_value: f64,
    pub target_date: NaiveDate,
    pub start_date: NaiveDate,
    /// Average emissions for the category when the goal was set
    pub start_value: f64,
}

/// Inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidInput(format!(
                "date range starts after it ends ({} > {})",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Emission statistics over a set of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<DateRange>,
    pub total_emissions: f64,
    /// Mean over entries, not calendar days
    pub average_daily_emissions: f64,
    pub highest_emission_day: NaiveDate,
    pub lowest_emission_day: NaiveDate,
    pub number_of_entries: usize,
    pub by_category: BTreeMap<Category, f64>,
}

/// Total emissions attributed to a single date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Summary restricted to one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub summary: Summary,
    pub highest_day: DayTotal,
}

/// A single point in a plottable emissions series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub emissions: BTreeMap<Category, f64>,
    pub total: f64,
}

/// Progress toward a goal, computed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub current_value: f64,
    /// Percentage in [0, 100]
    pub progress: f64,
    /// Days until the target date; negative once it has passed
    pub days_remaining: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(
            " Electricity ".parse::<Category>().unwrap(),
            Category::Electricity
        );
        assert_eq!("FOOD".parse::<Category>().unwrap(), Category::Food);
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = "gasoline".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(ref name) if name == "gasoline"));
    }

    #[test]
    fn test_category_roundtrip_names() {
        for category in Category::all() {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), *category);
        }
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(
            DateRange::new(from, to),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_date_range_inclusive() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let range = DateRange::new(from, to).unwrap();
        assert!(range.contains(from));
        assert!(range.contains(to));
        assert!(!range.contains(to.succ_opt().unwrap()));
    }

    #[test]
    fn test_entry_serializes_category_keys() {
        let mut emissions = BTreeMap::new();
        emissions.insert(Category::Electricity, 4.0);
        let entry = Entry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            inputs: BTreeMap::from([("electricity".to_string(), 10.0)]),
            emissions,
            total_emissions: 4.0,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["emissions"]["electricity"], 4.0);

        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
