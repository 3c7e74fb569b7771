//! ICS document generation.

use chrono::Utc;
use icalendar::{Calendar, Component, Property, ValueType};

use crate::builder::HolidayCalendar;
use crate::error::HolidayResult;
use crate::event::HolidayEvent;

pub const PRODID: &str = "-//China Holiday Calendar//github.com//china-calendar//";
pub const CALENDAR_NAME: &str = "中国节假日与常用节日";
pub const CALENDAR_TIMEZONE: &str = "Asia/Shanghai";

/// Generate the .ics content for the whole calendar
pub fn generate_ics(calendar: &HolidayCalendar) -> HolidayResult<String> {
    let mut cal = Calendar::new();
    cal.name(CALENDAR_NAME);
    cal.timezone(CALENDAR_TIMEZONE);

    // DTSTAMP must be UTC
    let dtstamp = calendar
        .created
        .with_timezone(&Utc)
        .format("%Y%m%dT%H%M%SZ")
        .to_string();

    for event in &calendar.events {
        cal.push(to_ics_event(event, &dtstamp));
    }

    Ok(rewrite_header(&cal.done().to_string()))
}

fn to_ics_event(event: &HolidayEvent, dtstamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid());
    ics_event.summary(&event.title);
    ics_event.description(&event.description);
    ics_event.add_property("CATEGORIES", event.category.label());

    add_date_property(&mut ics_event, "DTSTART", event.date);
    add_date_property(&mut ics_event, "DTEND", event.end_date());

    // Holidays never block free/busy time
    ics_event.add_property("TRANSP", "TRANSPARENT");

    ics_event.add_property("DTSTAMP", dtstamp);

    ics_event.done()
}

/// Date-only property (`NAME;VALUE=DATE:YYYYMMDD`)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: chrono::NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up the icalendar crate's header lines
/// - Replace its PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn rewrite_header(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
