//! Goal command implementations (set, list, progress)

use anyhow::{Context, Result};
use carbon_core::{Category, EntryStore, Goal};
use chrono::{Local, NaiveDate};

pub fn cmd_goal_set(
    store: &impl EntryStore,
    category: &str,
    target: f64,
    target_date: NaiveDate,
) -> Result<Goal> {
    let category: Category = category.parse()?;
    let entries = store.load().context("Failed to load entries")?;
    let goal = Goal::new(category, target, target_date, &entries)?;

    let mut goals = store.load_goals().context("Failed to load goals")?;
    goals.push(goal.clone());
    store.save_goals(&goals).context("Failed to save goals")?;

    println!("🎯 Goal set for {}", category);
    println!(
        "   From {:.2} to {:.2} kg CO2 per entry by {}",
        goal.start_value, goal.target_value, goal.target_date
    );
    if entries.iter().all(|e| e.emission(category).is_none()) {
        println!("   \x1b[2mNo {} entries yet; starting value is 0\x1b[0m", category);
    }
    Ok(goal)
}

pub fn cmd_goal_list(store: &impl EntryStore) -> Result<()> {
    let goals = store.load_goals().context("Failed to load goals")?;

    println!();
    println!("🎯 Goals");
    println!("   ─────────────────────────────────────────────────────────────");
    if goals.is_empty() {
        println!("   No goals set. Add one with: carbon goal set electricity --target 4 --by 2025-12-31");
        return Ok(());
    }

    println!(
        "   {:15} │ {:>8} │ {:>8} │ {:10} │ {:10}",
        "Category", "Start", "Target", "Since", "By"
    );
    println!("   ────────────────┼──────────┼──────────┼────────────┼───────────");
    for goal in &goals {
        println!(
            "   {:15} │ {:>8.2} │ {:>8.2} │ {:10} │ {:10}",
            goal.category.as_str(),
            goal.start_value,
            goal.target_value,
            goal.start_date,
            goal.target_date
        );
    }
    Ok(())
}

pub fn cmd_goal_progress(store: &impl EntryStore) -> Result<()> {
    let goals = store.load_goals().context("Failed to load goals")?;
    let entries = store.load().context("Failed to load entries")?;
    let today = Local::now().date_naive();

    println!();
    println!("🏁 Goal Progress");
    println!("   ─────────────────────────────────────────────────────────────");
    if goals.is_empty() {
        println!("   No goals set.");
        return Ok(());
    }

    for goal in &goals {
        let status = goal.evaluate(&entries, today);
        let filled = (status.progress / 10.0).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));
        let deadline = if status.days_remaining >= 0 {
            format!("{} days left", status.days_remaining)
        } else {
            format!("{} days overdue", -status.days_remaining)
        };
        println!(
            "   {:15} {} {:>5.1}%  now {:.2} → target {:.2}  ({})",
            goal.category.as_str(),
            bar,
            status.progress,
            status.current_value,
            goal.target_value,
            deadline
        );
    }
    Ok(())
}
