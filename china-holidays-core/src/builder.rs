//! Calendar assembly.
//!
//! [`CalendarBuilder::build`] runs four passes in a fixed order over the
//! target years (the as-of year in Shanghai and the year after):
//!
//! 1. statutory holidays and compensatory workdays from the feed, per year
//! 2. fixed-date international holidays from the fixed rule table
//! 3. lunar traditional festivals from the lunar rule table
//! 4. floating international holidays (weekday-occurrence rules)
//!
//! A pass whose source is unavailable is skipped and reported; the other
//! passes still run. Malformed rule data aborts the build.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Asia::Shanghai;
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::date_rules::FLOATING_HOLIDAYS;
use crate::error::{HolidayError, HolidayResult};
use crate::event::{Category, HolidayEvent};
use crate::lunar::{LunarConverter, lunar_to_solar};
use crate::sources::{
    FixedHolidayRule, LunarHolidayRule, StatutoryFeed, events_from_records, load_fixed_rules,
    load_lunar_rules,
};

/// The generated calendar document.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    /// Build instant in Shanghai local time, written in UTC as each event's DTSTAMP
    pub created: DateTime<Tz>,
    pub years: [i32; 2],
    /// Events in insertion order
    pub events: Vec<HolidayEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Statutory { year: i32 },
    Fixed,
    Lunar,
    Floating,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Statutory { year } => write!(f, "statutory {}", year),
            Pass::Fixed => write!(f, "fixed"),
            Pass::Lunar => write!(f, "lunar"),
            Pass::Floating => write!(f, "floating"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Completed { events: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub pass: Pass,
    pub outcome: PassOutcome,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub calendar: HolidayCalendar,
    /// One report per pass, in execution order
    pub passes: Vec<PassReport>,
}

impl BuildOutput {
    pub fn skipped(&self) -> impl Iterator<Item = &PassReport> {
        self.passes
            .iter()
            .filter(|r| matches!(r.outcome, PassOutcome::Skipped { .. }))
    }
}

/// Target years for an as-of instant: its Shanghai-local year and the next.
pub fn target_years(as_of: DateTime<Utc>) -> [i32; 2] {
    let year = as_of.with_timezone(&Shanghai).year();
    [year, year + 1]
}

pub struct CalendarBuilder<'a> {
    feed: &'a dyn StatutoryFeed,
    converter: &'a dyn LunarConverter,
    fixed_rules_path: PathBuf,
    lunar_rules_path: PathBuf,
}

impl<'a> CalendarBuilder<'a> {
    pub fn new(
        feed: &'a dyn StatutoryFeed,
        converter: &'a dyn LunarConverter,
        fixed_rules_path: impl AsRef<Path>,
        lunar_rules_path: impl AsRef<Path>,
    ) -> Self {
        CalendarBuilder {
            feed,
            converter,
            fixed_rules_path: fixed_rules_path.as_ref().to_path_buf(),
            lunar_rules_path: lunar_rules_path.as_ref().to_path_buf(),
        }
    }

    /// Build the calendar as of the given instant.
    pub fn build(&self, as_of: DateTime<Utc>) -> HolidayResult<BuildOutput> {
        let years = target_years(as_of);
        let mut events = Vec::new();
        let mut passes = Vec::new();

        for year in years {
            let result = self
                .feed
                .fetch_year(year)
                .and_then(|records| events_from_records(&records));
            passes.push(settle(Pass::Statutory { year }, result, &mut events)?);
        }

        let fixed = load_fixed_rules(&self.fixed_rules_path)
            .and_then(|rules| fixed_holiday_events(&years, &rules));
        passes.push(settle(Pass::Fixed, fixed, &mut events)?);

        let lunar = load_lunar_rules(&self.lunar_rules_path)
            .map(|rules| lunar_holiday_events(self.converter, &years, &rules));
        passes.push(settle(Pass::Lunar, lunar, &mut events)?);

        let floating = floating_holiday_events(&years);
        passes.push(settle(Pass::Floating, floating, &mut events)?);

        Ok(BuildOutput {
            calendar: HolidayCalendar {
                created: as_of.with_timezone(&Shanghai),
                years,
                events,
            },
            passes,
        })
    }
}

/// Fold one pass result into the document, turning recoverable errors into
/// a skipped report and propagating the rest.
fn settle(
    pass: Pass,
    result: HolidayResult<Vec<HolidayEvent>>,
    events: &mut Vec<HolidayEvent>,
) -> HolidayResult<PassReport> {
    let outcome = match result {
        Ok(new_events) => {
            let count = new_events.len();
            info!(%pass, events = count, "Pass completed");
            events.extend(new_events);
            PassOutcome::Completed { events: count }
        }
        Err(e) if e.is_recoverable() => {
            warn!(%pass, error = %e, "Pass skipped");
            PassOutcome::Skipped {
                reason: e.to_string(),
            }
        }
        Err(e) => return Err(e),
    };

    Ok(PassReport { pass, outcome })
}

pub fn fixed_holiday_events(
    years: &[i32],
    rules: &[FixedHolidayRule],
) -> HolidayResult<Vec<HolidayEvent>> {
    let mut events = Vec::with_capacity(years.len() * rules.len());

    for &year in years {
        for rule in rules {
            let date = NaiveDate::from_ymd_opt(year, rule.month, rule.day).ok_or_else(|| {
                HolidayError::InvalidDate(format!(
                    "{}: {}-{:02}-{:02}",
                    rule.name, year, rule.month, rule.day
                ))
            })?;
            events.push(HolidayEvent::new(
                date,
                rule.name.clone(),
                rule.description.as_deref(),
                Category::InternationalHoliday,
            ));
        }
    }

    Ok(events)
}

/// Lunar festivals for the target years, each (date, title) emitted once.
pub fn lunar_holiday_events(
    converter: &dyn LunarConverter,
    years: &[i32],
    rules: &[LunarHolidayRule],
) -> Vec<HolidayEvent> {
    let mut seen: HashSet<(NaiveDate, &str)> = HashSet::new();
    let mut events = Vec::new();

    for &year in years {
        for rule in rules {
            for date in lunar_to_solar(converter, year, rule.lunar_month, rule.lunar_day) {
                if !seen.insert((date, rule.name.as_str())) {
                    continue;
                }
                events.push(HolidayEvent::new(
                    date,
                    rule.name.clone(),
                    rule.description.as_deref(),
                    Category::TraditionalHoliday,
                ));
            }
        }
    }

    events
}

pub fn floating_holiday_events(years: &[i32]) -> HolidayResult<Vec<HolidayEvent>> {
    let mut events = Vec::with_capacity(years.len() * FLOATING_HOLIDAYS.len());

    for &year in years {
        for rule in &FLOATING_HOLIDAYS {
            let date = rule.date_in(year).ok_or_else(|| {
                HolidayError::InvalidDate(format!("{} in {}", rule.name, year))
            })?;
            events.push(HolidayEvent::new(
                date,
                rule.name,
                Some(rule.description),
                Category::InternationalHoliday,
            ));
        }
    }

    Ok(events)
}
