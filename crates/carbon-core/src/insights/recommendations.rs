//! Dominant category detection and static reduction advice

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{Category, Entry};

/// Mean emissions per category, averaged over the entries that record it
pub fn category_means(entries: &[Entry]) -> BTreeMap<Category, f64> {
    let mut sums: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for entry in entries {
        for (&category, &value) in &entry.emissions {
            let slot = sums.entry(category).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(category, (sum, count))| (category, sum / count as f64))
        .collect()
}

/// Category with the highest mean emissions.
///
/// Ties resolve to the lexicographically lowest category name.
pub fn dominant_category(entries: &[Entry]) -> Result<Category> {
    let mut means: Vec<(Category, f64)> = category_means(entries).into_iter().collect();
    means.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

    let mut best: Option<(Category, f64)> = None;
    for (category, mean) in means {
        match best {
            Some((_, top)) if mean <= top => {}
            _ => best = Some((category, mean)),
        }
    }

    best.map(|(category, _)| category)
        .ok_or_else(|| Error::EmptyDataset("no category emissions recorded".to_string()))
}

/// Reduction advice for a category, in priority order
pub fn recommend(category: Category) -> &'static [&'static str] {
    match category {
        Category::Electricity => &[
            "Consider switching to LED bulbs",
            "Use natural light when possible",
            "Upgrade to energy-efficient appliances",
        ],
        Category::Transportation => &[
            "Use public transportation when possible",
            "Consider carpooling",
            "Plan efficient routes to reduce distance",
        ],
        Category::Heating => &[
            "Improve home insulation",
            "Use a programmable thermostat",
            "Service heating system regularly",
        ],
        Category::Waste => &[
            "Increase recycling efforts",
            "Start composting organic waste",
            "Reduce single-use items",
        ],
        Category::Water => &[
            "Install low-flow showerheads and taps",
            "Fix leaking pipes and fixtures promptly",
            "Run dishwashers and washing machines only when full",
        ],
        Category::Food => &[
            "Eat more plant-based meals",
            "Buy local and seasonal produce",
            "Plan meals to reduce food waste",
        ],
        Category::Electronics => &[
            "Unplug devices that are not in use",
            "Enable power-saving modes",
            "Repair or refurbish devices instead of replacing them",
        ],
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn entry(emissions: &[(Category, f64)]) -> Entry {
        let emissions: BTreeMap<Category, f64> = emissions.iter().copied().collect();
        let total = emissions.values().fold(0.0, |acc, v| acc + v);
        Entry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            inputs: BTreeMap::new(),
            emissions,
            total_emissions: total,
        }
    }

    #[test]
    fn test_dominant_category_highest_mean() {
        let entries = vec![
            entry(&[(Category::Electricity, 4.0), (Category::Heating, 1.0)]),
            entry(&[(Category::Electricity, 2.0), (Category::Heating, 6.0)]),
        ];
        assert_eq!(dominant_category(&entries).unwrap(), Category::Heating);
    }

    #[test]
    fn test_dominant_category_mean_over_present_entries() {
        // Food appears once at 5.0; electricity averages 4.0 over three entries
        let entries = vec![
            entry(&[(Category::Electricity, 4.0), (Category::Food, 5.0)]),
            entry(&[(Category::Electricity, 4.0)]),
            entry(&[(Category::Electricity, 4.0)]),
        ];
        assert_eq!(dominant_category(&entries).unwrap(), Category::Food);
    }

    #[test]
    fn test_dominant_category_tie_is_lexicographic() {
        let entries = vec![entry(&[
            (Category::Waste, 3.0),
            (Category::Transportation, 3.0),
            (Category::Electronics, 3.0),
        ])];
        assert_eq!(dominant_category(&entries).unwrap(), Category::Electronics);
    }

    #[test]
    fn test_dominant_category_empty() {
        assert!(matches!(
            dominant_category(&[]),
            Err(Error::EmptyDataset(_))
        ));
        assert!(dominant_category(&[entry(&[])]).is_err());
    }

    #[test]
    fn test_recommend_returns_declared_list() {
        let advice = recommend(Category::Electricity);
        assert_eq!(
            advice,
            &[
                "Consider switching to LED bulbs",
                "Use natural light when possible",
                "Upgrade to energy-efficient appliances",
            ]
        );
    }

    #[test]
    fn test_every_category_has_advice() {
        for category in Category::all() {
            assert!(!recommend(*category).is_empty());
        }
    }
}
