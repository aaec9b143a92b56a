//! Goal tracking
//!
//! A goal anchors on the category's average emissions at the moment it is
//! set. Progress is recomputed on demand from the current average and is
//! clamped to [0, 100]: getting worse reads as 0%, overshooting the target
//! reads as 100%.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{Category, Entry, Goal, GoalProgress};

/// Mean emissions for a category across the entries that record it.
///
/// Returns 0.0 when the category was never recorded.
pub fn average_emissions(category: Category, entries: &[Entry]) -> f64 {
    let (sum, count) = entries
        .iter()
        .filter_map(|e| e.emission(category))
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl Goal {
    /// Set a goal starting today, anchored on the current average
    pub fn new(
        category: Category,
        target_value: f64,
        target_date: NaiveDate,
        entries_so_far: &[Entry],
    ) -> Result<Self> {
        let today = chrono::Local::now().date_naive();
        Self::starting_on(category, target_value, target_date, today, entries_so_far)
    }

    /// Set a goal with an explicit start date.
    ///
    /// Fails with `InvalidInput` when the target is NaN or infinite.
    pub fn starting_on(
        category: Category,
        target_value: f64,
        target_date: NaiveDate,
        start_date: NaiveDate,
        entries_so_far: &[Entry],
    ) -> Result<Self> {
        if !target_value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "target for {} is not a finite number",
                category
            )));
        }

        let start_value = average_emissions(category, entries_so_far);
        tracing::debug!(
            category = category.as_str(),
            start_value,
            target_value,
            "Goal anchored"
        );
        Ok(Self {
            category,
            target_value,
            target_date,
            start_date,
            start_value,
        })
    }

    /// Percentage of the way from start value to target value, in [0, 100]
    pub fn progress(&self, entries_now: &[Entry]) -> f64 {
        let current_value = average_emissions(self.category, entries_now);
        self.progress_from(current_value)
    }

    fn progress_from(&self, current_value: f64) -> f64 {
        let total_reduction = self.start_value - current_value;
        let target_reduction = self.start_value - self.target_value;

        if target_reduction == 0.0 {
            return 100.0;
        }

        (total_reduction / target_reduction * 100.0).clamp(0.0, 100.0)
    }

    /// Progress plus current value and days left, as of `today`
    pub fn evaluate(&self, entries_now: &[Entry], today: NaiveDate) -> GoalProgress {
        let current_value = average_emissions(self.category, entries_now);
        GoalProgress {
            goal: self.clone(),
            current_value,
            progress: self.progress_from(current_value),
            days_remaining: (self.target_date - today).num_days(),
        }
    }
}

/// Free-function form of [`Goal::new`]
pub fn set_goal(
    category: Category,
    target_value: f64,
    target_date: NaiveDate,
    entries_so_far: &[Entry],
) -> Result<Goal> {
    Goal::new(category, target_value, target_date, entries_so_far)
}

/// Free-function form of [`Goal::progress`]
pub fn progress(goal: &Goal, entries_now: &[Entry]) -> f64 {
    goal.progress(entries_now)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn electricity(value: f64) -> Entry {
        Entry {
            date: day(2024, 1, 1),
            inputs: BTreeMap::new(),
            emissions: BTreeMap::from([(Category::Electricity, value)]),
            total_emissions: value,
        }
    }

    fn goal(start_value: f64, target_value: f64) -> Goal {
        Goal {
            category: Category::Electricity,
            target_value,
            target_date: day(2024, 12, 31),
            start_date: day(2024, 1, 1),
            start_value,
        }
    }

    #[test]
    fn test_average_emissions_present_only() {
        let mut water = electricity(0.0);
        water.emissions = BTreeMap::from([(Category::Water, 9.0)]);
        let entries = vec![electricity(2.0), water, electricity(4.0)];
        assert_eq!(average_emissions(Category::Electricity, &entries), 3.0);
        assert_eq!(average_emissions(Category::Food, &entries), 0.0);
    }

    #[test]
    fn test_set_goal_captures_start_value() {
        let entries = vec![electricity(8.0), electricity(12.0)];
        let g = Goal::starting_on(
            Category::Electricity,
            4.0,
            day(2024, 6, 30),
            day(2024, 1, 15),
            &entries,
        )
        .unwrap();
        assert_eq!(g.start_value, 10.0);
        assert_eq!(g.start_date, day(2024, 1, 15));
    }

    #[test]
    fn test_set_goal_starts_today() {
        let g = set_goal(Category::Heating, 1.0, day(2030, 1, 1), &[]).unwrap();
        assert_eq!(g.start_date, chrono::Local::now().date_naive());
        assert_eq!(g.start_value, 0.0);
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let entries = vec![electricity(8.0)];
        for target in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Goal::starting_on(
                Category::Electricity,
                target,
                day(2024, 6, 30),
                day(2024, 1, 1),
                &entries,
            );
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
        assert!(set_goal(Category::Water, f64::NAN, day(2030, 1, 1), &entries).is_err());
    }

    #[test]
    fn test_progress_halfway() {
        let g = goal(10.0, 4.0);
        assert_eq!(g.progress(&[electricity(7.0)]), 50.0);
    }

    #[test]
    fn test_progress_reaching_target_is_100() {
        let g = goal(10.0, 4.0);
        assert_eq!(progress(&g, &[electricity(4.0)]), 100.0);
        assert_eq!(progress(&g, &[electricity(1.0)]), 100.0);
    }

    #[test]
    fn test_progress_no_improvement_is_0() {
        let g = goal(10.0, 4.0);
        assert_eq!(g.progress(&[electricity(10.0)]), 0.0);
        assert_eq!(g.progress(&[electricity(15.0)]), 0.0);
    }

    #[test]
    fn test_progress_zero_target_reduction_is_100() {
        let g = goal(5.0, 5.0);
        assert_eq!(g.progress(&[electricity(50.0)]), 100.0);
    }

    #[test]
    fn test_evaluate_days_remaining() {
        let g = goal(10.0, 4.0);
        let status = g.evaluate(&[electricity(7.0)], day(2024, 12, 1));
        assert_eq!(status.current_value, 7.0);
        assert_eq!(status.progress, 50.0);
        assert_eq!(status.days_remaining, 30);

        let late = g.evaluate(&[electricity(7.0)], day(2025, 1, 2));
        assert_eq!(late.days_remaining, -2);
    }
}
