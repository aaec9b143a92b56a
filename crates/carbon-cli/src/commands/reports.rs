//! Report command implementations

use anyhow::{Context, Result};
use carbon_core::{
    analyze, daily_totals, dominant_category, monthly_report, peak_day, recent_trend, recommend,
    series, summarize, Category, DateRange, EntryStore, Summary, TrendDirection,
};
use chrono::{Datelike, Local, NaiveDate};

use super::parse_date;

/// Turn an empty-dataset error into `None` so commands can print a notice
fn or_no_data<T>(result: carbon_core::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_empty_dataset() => {
            println!("   No data available.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Build an inclusive window from optional --from/--to; an open side is unbounded
pub fn resolve_window(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let from = from.map(parse_date).transpose()?.unwrap_or(NaiveDate::MIN);
    let to = to.map(parse_date).transpose()?.unwrap_or(NaiveDate::MAX);
    Ok(Some(DateRange::new(from, to)?))
}

fn print_summary(summary: &Summary) {
    println!("   Total:             {:>10.2} kg CO2", summary.total_emissions);
    println!(
        "   Average per entry: {:>10.2} kg CO2",
        summary.average_daily_emissions
    );
    println!("   Entries:           {:>10}", summary.number_of_entries);
    println!("   Highest day:       {:>10}", summary.highest_emission_day);
    println!("   Lowest day:        {:>10}", summary.lowest_emission_day);

    if summary.by_category.is_empty() {
        return;
    }
    println!();
    println!("   {:15} │ {:>10} │ {:>6}", "Category", "kg CO2", "%");
    println!("   ────────────────┼────────────┼────────");
    for (category, amount) in &summary.by_category {
        let pct = if summary.total_emissions != 0.0 {
            amount / summary.total_emissions * 100.0
        } else {
            0.0
        };
        println!(
            "   {:15} │ {:>10.2} │ {:>5.1}%",
            category.as_str(),
            amount,
            pct
        );
    }
}

pub fn cmd_summary(store: &impl EntryStore, window: Option<DateRange>, json: bool) -> Result<()> {
    let entries = store.load().context("Failed to load entries")?;

    if json {
        let summary = summarize(&entries, window)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Emissions Summary");
    if let Some(range) = window {
        println!("   Period: {} to {}", range.from, range.to);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if let Some(summary) = or_no_data(summarize(&entries, window))? {
        print_summary(&summary);
    }
    Ok(())
}

pub fn cmd_monthly(store: &impl EntryStore, month: Option<(i32, u32)>, json: bool) -> Result<()> {
    let (year, month) = month.unwrap_or_else(|| {
        let today = Local::now().date_naive();
        (today.year(), today.month())
    });
    let entries = store.load().context("Failed to load entries")?;

    if json {
        let report = monthly_report(&entries, year, month)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("🗓️  Monthly Report: {}-{:02}", year, month);
    println!("   ─────────────────────────────────────────────────────────────");

    if let Some(report) = or_no_data(monthly_report(&entries, year, month))? {
        print_summary(&report.summary);
        println!();
        println!(
            "   Highest day this month: {} ({:.2} kg CO2)",
            report.highest_day.date, report.highest_day.total
        );
    }
    Ok(())
}

pub fn cmd_daily(store: &impl EntryStore) -> Result<()> {
    let entries = store.load().context("Failed to load entries")?;
    let days = daily_totals(&entries);

    println!();
    println!("📅 Daily Emissions");
    println!("   ─────────────────────────────────────────────────────────────");

    if days.is_empty() {
        println!("   No data available.");
        return Ok(());
    }

    println!("   {:10} │ {:>10}", "Date", "kg CO2");
    println!("   ───────────┼────────────");
    for day in &days {
        println!("   {:10} │ {:>10.2}", day.date, day.total);
    }
    Ok(())
}

pub fn cmd_trend(store: &impl EntryStore, window: usize) -> Result<()> {
    let entries = store.load().context("Failed to load entries")?;
    let trend = recent_trend(&entries, window);
    let direction = TrendDirection::from_delta(trend);

    println!();
    println!("📈 Recent Trend (last {} entries)", window);
    println!("   ─────────────────────────────────────────────────────────────");
    match direction {
        TrendDirection::Rising => println!("   Rising by {:.2} kg CO2 per entry", trend),
        TrendDirection::Falling => println!("   Falling by {:.2} kg CO2 per entry", trend.abs()),
        TrendDirection::Steady => println!("   No change"),
    }
    Ok(())
}

pub fn cmd_peak(store: &impl EntryStore) -> Result<()> {
    let entries = store.load().context("Failed to load entries")?;

    println!();
    println!("🔺 Peak Day");
    println!("   ─────────────────────────────────────────────────────────────");
    if let Some(peak) = or_no_data(peak_day(&entries))? {
        println!("   {} with {:.2} kg CO2", peak.date, peak.total);
    }
    Ok(())
}

fn print_recommendations(category: Category) {
    println!("   Biggest source: {}", category.as_str());
    println!();
    for (i, advice) in recommend(category).iter().enumerate() {
        println!("   {}. {}", i + 1, advice);
    }
}

pub fn cmd_recommend(store: &impl EntryStore) -> Result<()> {
    let entries = store.load().context("Failed to load entries")?;

    println!();
    println!("💡 Recommendations for reducing your carbon footprint");
    println!("   ─────────────────────────────────────────────────────────────");
    if let Some(category) = or_no_data(dominant_category(&entries))? {
        print_recommendations(category);
    }
    Ok(())
}

pub fn cmd_insights(store: &impl EntryStore, window: usize, json: bool) -> Result<()> {
    let entries = store.load().context("Failed to load entries")?;

    if json {
        let report = analyze(&entries, window)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("🔎 Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    if let Some(report) = or_no_data(analyze(&entries, window))? {
        println!(
            "   Trend (last {} entries): {} ({:+.2} kg CO2 per entry)",
            report.window_size, report.direction, report.trend
        );
        println!(
            "   Peak day: {} ({:.2} kg CO2)",
            report.peak.date, report.peak.total
        );
        print_recommendations(report.dominant_category);
    }
    Ok(())
}

pub fn cmd_series(store: &impl EntryStore, json: bool) -> Result<()> {
    let entries = store.load().context("Failed to load entries")?;
    let points = series(&entries);

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    if points.is_empty() {
        println!("No data available.");
        return Ok(());
    }

    // Tab-separated so it pastes straight into a plotting tool
    let categories = Category::all();
    let header: Vec<&str> = std::iter::once("date")
        .chain(categories.iter().map(|c| c.as_str()))
        .chain(std::iter::once("total"))
        .collect();
    println!("{}", header.join("\t"));

    for point in &points {
        let mut cells = vec![point.date.to_string()];
        for category in categories {
            cells.push(format!(
                "{:.3}",
                point.emissions.get(category).copied().unwrap_or(0.0)
            ));
        }
        cells.push(format!("{:.3}", point.total));
        println!("{}", cells.join("\t"));
    }
    Ok(())
}
