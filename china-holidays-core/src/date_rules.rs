//! Rule-based date evaluation.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The n-th `weekday` of `month` in `year` (n counts from 1).
///
/// Returns `None` only when `year`/`month` do not form a valid month. An `n`
/// large enough to overflow the month is not checked; the result simply lands
/// in a later month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    let weeks = n.saturating_sub(1) * 7;
    first.checked_add_days(Days::new(u64::from(offset + weeks)))
}

/// A holiday defined by a weekday-occurrence rule.
#[derive(Debug, Clone, Copy)]
pub struct FloatingHolidayRule {
    pub name: &'static str,
    pub month: u32,
    pub weekday: Weekday,
    pub n: u32,
    pub description: &'static str,
}

impl FloatingHolidayRule {
    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        nth_weekday_of_month(year, self.month, self.weekday, self.n)
    }
}

/// Floating international observances emitted every year.
pub const FLOATING_HOLIDAYS: [FloatingHolidayRule; 3] = [
    FloatingHolidayRule {
        name: "母亲节",
        month: 5,
        weekday: Weekday::Sun,
        n: 2,
        description: "浮动国际节日：五月第二个星期日",
    },
    FloatingHolidayRule {
        name: "父亲节",
        month: 6,
        weekday: Weekday::Sun,
        n: 3,
        description: "浮动国际节日：六月第三个星期日",
    },
    FloatingHolidayRule {
        name: "感恩节",
        month: 11,
        weekday: Weekday::Thu,
        n: 4,
        description: "浮动国际节日：十一月第四个星期四（美）",
    },
];
