//! Canonical all-day holiday event.
//!
//! Every source (statutory feed, fixed rules, lunar rules, floating rules)
//! normalizes its items into a [`HolidayEvent`]. Events carry a date only;
//! the exclusive end boundary is always the following day.

use chrono::{Days, NaiveDate};

/// Suffix appended to every event UID.
const UID_DOMAIN: &str = "china-calendar";

/// What kind of day an event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Government-designated day off
    StatutoryHoliday,
    /// Weekend day redesignated as a working day
    CompensatoryWorkday,
    /// Fixed-date or floating international observance
    InternationalHoliday,
    /// Lunar-calendar traditional festival
    TraditionalHoliday,
}

impl Category {
    /// Value written to the CATEGORIES property.
    pub fn label(self) -> &'static str {
        match self {
            Category::StatutoryHoliday => "法定节假日",
            Category::CompensatoryWorkday => "补班",
            Category::InternationalHoliday => "国际节日",
            Category::TraditionalHoliday => "传统节日",
        }
    }

    /// Description used when the source provides none.
    pub fn default_description(self) -> &'static str {
        match self {
            Category::StatutoryHoliday => "法定节假日（来源：holiday-cn）",
            Category::CompensatoryWorkday => "调休安排的工作日（来源：holiday-cn）",
            Category::InternationalHoliday => "固定公历节日",
            Category::TraditionalHoliday => "中国传统节日",
        }
    }
}

/// A single all-day calendar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayEvent {
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub category: Category,
}

impl HolidayEvent {
    /// Normalize a raw item into an event.
    ///
    /// An empty or missing description falls back to the category default.
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        description: Option<&str>,
        category: Category,
    ) -> Self {
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| category.default_description())
            .to_string();

        HolidayEvent {
            date,
            title: title.into(),
            description,
            category,
        }
    }

    /// Exclusive end date (the day after `date`).
    pub fn end_date(&self) -> NaiveDate {
        // Only NaiveDate::MAX has no successor
        self.date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
    }

    /// Identifier derived from date and title.
    pub fn uid(&self) -> String {
        format!("{}-{}@{}", self.date.format("%Y-%m-%d"), self.title, UID_DOMAIN)
    }
}
