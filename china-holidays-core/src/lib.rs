//! Core of the China holiday calendar generator.
//!
//! This crate turns holiday sources into a single all-day ICS calendar:
//! - `sources` for the statutory feed and the fixed/lunar rule tables
//! - `date_rules` and `lunar` for computing dates from rules
//! - `builder` for running the generation passes
//! - `ics` for rendering and writing the result

pub mod builder;
pub mod date_rules;
pub mod error;
pub mod event;
pub mod ics;
pub mod lunar;
pub mod sources;

pub use builder::{BuildOutput, CalendarBuilder, HolidayCalendar, Pass, PassOutcome, PassReport};
pub use error::{HolidayError, HolidayResult};
pub use event::{Category, HolidayEvent};
pub use lunar::{ChineseLunarCalendar, LunarConverter};
pub use sources::{HttpStatutoryFeed, StatutoryFeed};
