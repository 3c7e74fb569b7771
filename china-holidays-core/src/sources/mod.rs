//! Holiday data sources.
//!
//! - `statutory`: yearly statutory holiday / workday feed (remote JSON)
//! - `rules`: fixed-date and lunar-date rule tables (local CSV)

pub mod rules;
pub mod statutory;

pub use rules::{FixedHolidayRule, LunarHolidayRule, load_fixed_rules, load_lunar_rules};
pub use statutory::{HttpStatutoryFeed, RawHolidayRecord, StatutoryFeed, events_from_records};
