//! Lunar (Chinese calendar) to solar date conversion.
//!
//! The builder only needs one capability from a lunar calendar: turning a
//! (lunar year, month, day) triple into a Gregorian date, or learning that
//! the triple does not exist that year. That capability sits behind
//! [`LunarConverter`]; [`ChineseLunarCalendar`] implements it with ICU4X.

use chrono::{Datelike, NaiveDate};
use icu_calendar::{Date, Ref};
use icu_calendar::cal::Chinese;
use icu_calendar::types::MonthCode;

/// Converts lunar dates to solar dates.
pub trait LunarConverter {
    /// Solar date of the given non-leap lunar month/day in `lunar_year`.
    ///
    /// `lunar_year` is the solar year in which that lunar year begins.
    /// Returns `None` when the date does not exist (e.g. day 30 of a short month).
    fn convert(&self, lunar_year: i32, lunar_month: u8, lunar_day: u8) -> Option<NaiveDate>;
}

/// ICU4X-backed Chinese calendar.
#[derive(Debug, Clone)]
pub struct ChineseLunarCalendar {
    calendar: Chinese,
}

impl ChineseLunarCalendar {
    pub fn new() -> Self {
        ChineseLunarCalendar {
            calendar: Chinese::new(),
        }
    }
}

impl Default for ChineseLunarCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl LunarConverter for ChineseLunarCalendar {
    fn convert(&self, lunar_year: i32, lunar_month: u8, lunar_day: u8) -> Option<NaiveDate> {
        let month_code = MonthCode::new_normal(lunar_month)?;
        let lunar =
            Date::try_new_from_codes(None, lunar_year, month_code, lunar_day, Ref(&self.calendar))
                .ok()?;
        let iso = lunar.to_iso();

        NaiveDate::from_ymd_opt(
            iso.extended_year(),
            u32::from(iso.month().ordinal),
            u32::from(iso.day_of_month().0),
        )
    }
}

/// Solar dates in `solar_year` on which lunar `month`/`day` falls.
///
/// A lunar year's last months spill into the next solar year, so both lunar
/// year `solar_year` and `solar_year - 1` are tried. Only dates inside
/// `solar_year` are kept; the result has 0, 1 or 2 entries.
pub fn lunar_to_solar(
    converter: &dyn LunarConverter,
    solar_year: i32,
    lunar_month: u8,
    lunar_day: u8,
) -> Vec<NaiveDate> {
    [solar_year, solar_year - 1]
        .into_iter()
        .filter_map(|lunar_year| converter.convert(lunar_year, lunar_month, lunar_day))
        .filter(|date| date.year() == solar_year)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_convert_known_festivals() {
        let cal = ChineseLunarCalendar::new();

        assert_eq!(cal.convert(2024, 1, 1), Some(date(2024, 2, 10)), "春节 2024");
        assert_eq!(cal.convert(2025, 1, 1), Some(date(2025, 1, 29)), "春节 2025");
        assert_eq!(cal.convert(2024, 8, 15), Some(date(2024, 9, 17)), "中秋节 2024");
        assert_eq!(cal.convert(2025, 5, 5), Some(date(2025, 5, 31)), "端午节 2025");
        assert_eq!(cal.convert(2023, 12, 30), Some(date(2024, 2, 9)), "除夕 2024");
    }

    #[test]
    fn test_convert_nonexistent_day() {
        let cal = ChineseLunarCalendar::new();

        // The 12th month of lunar 2024 has only 29 days
        assert_eq!(cal.convert(2024, 12, 30), None);
        assert_eq!(cal.convert(2024, 1, 31), None);
        assert_eq!(cal.convert(2024, 13, 1), None);
    }

    #[test]
    fn test_lunar_to_solar_cross_year_month() {
        let cal = ChineseLunarCalendar::new();

        // 腊八: lunar 2024's falls in January 2025, so 2024 only gets lunar 2023's
        assert_eq!(lunar_to_solar(&cal, 2024, 12, 8), vec![date(2024, 1, 18)]);
        assert_eq!(lunar_to_solar(&cal, 2025, 12, 8), vec![date(2025, 1, 7)]);
    }

    #[test]
    fn test_lunar_to_solar_skips_invalid_candidate() {
        let cal = ChineseLunarCalendar::new();

        // Lunar 2024 12/30 does not exist; lunar 2023 12/30 is 2024-02-09
        assert_eq!(lunar_to_solar(&cal, 2024, 12, 30), vec![date(2024, 2, 9)]);
    }

    #[test]
    fn test_lunar_to_solar_results_stay_in_target_year() {
        let cal = ChineseLunarCalendar::new();

        for year in 2020..=2030 {
            for month in 1..=12u8 {
                for day in 1..=30u8 {
                    let dates = lunar_to_solar(&cal, year, month, day);
                    assert!(dates.len() <= 2, "{year} {month}/{day}: {dates:?}");
                    for d in &dates {
                        assert_eq!(d.year(), year, "{year} {month}/{day}: {d}");
                    }
                }
            }
        }
    }

    struct FixedConverter(Vec<((i32, u8, u8), NaiveDate)>);

    impl LunarConverter for FixedConverter {
        fn convert(&self, lunar_year: i32, lunar_month: u8, lunar_day: u8) -> Option<NaiveDate> {
            self.0
                .iter()
                .find(|(key, _)| *key == (lunar_year, lunar_month, lunar_day))
                .map(|(_, d)| *d)
        }
    }

    #[test]
    fn test_lunar_to_solar_can_return_two_dates() {
        let converter = FixedConverter(vec![
            ((2030, 12, 1), date(2030, 12, 25)),
            ((2029, 12, 1), date(2030, 1, 5)),
        ]);

        assert_eq!(
            lunar_to_solar(&converter, 2030, 12, 1),
            vec![date(2030, 12, 25), date(2030, 1, 5)],
            "current lunar year first, then previous"
        );
    }
}
