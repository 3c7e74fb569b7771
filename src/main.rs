mod config;
mod logging;

use anyhow::{Context, Result};
use china_holidays_core::builder::PassOutcome;
use china_holidays_core::{CalendarBuilder, ChineseLunarCalendar, HttpStatutoryFeed, ics};
use chrono::Utc;
use tracing::info;

fn main() -> Result<()> {
    logging::init()?;

    let cfg = config::load_config()?;

    let feed = HttpStatutoryFeed::new(&cfg.feed_url, cfg.feed_timeout())
        .context("Failed to set up statutory holiday feed")?;
    let converter = ChineseLunarCalendar::new();
    let builder = CalendarBuilder::new(
        &feed,
        &converter,
        &cfg.fixed_holidays_path,
        &cfg.lunar_holidays_path,
    );

    let output = builder.build(Utc::now()).context("Failed to build holiday calendar")?;
    let [current_year, next_year] = output.calendar.years;
    info!(current_year, next_year, "Calendar built");

    let content = ics::generate_ics(&output.calendar).context("Failed to generate ICS")?;
    ics::save_calendar(&cfg.output_path, &content)
        .with_context(|| format!("Failed to write {}", cfg.output_path.display()))?;

    println!(
        "Wrote {} events for {}-{} to {}",
        output.calendar.events.len(),
        current_year,
        next_year,
        cfg.output_path.display()
    );
    for report in &output.passes {
        match &report.outcome {
            PassOutcome::Completed { events } => println!("  {}: {} events", report.pass, events),
            PassOutcome::Skipped { reason } => println!("  {}: skipped ({})", report.pass, reason),
        }
    }

    Ok(())
}
