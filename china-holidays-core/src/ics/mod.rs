//! ICS output.
//!
//! Renders a [`HolidayCalendar`](crate::builder::HolidayCalendar) as an
//! RFC 5545 document of all-day events and writes it to disk.

mod generate;
mod write;

pub use generate::{CALENDAR_NAME, CALENDAR_TIMEZONE, PRODID, generate_ics};
pub use write::save_calendar;
