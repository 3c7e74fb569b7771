//! Statutory holiday and compensatory workday feed.
//!
//! The feed publishes one JSON document per year:
//!
//! ```json
//! { "year": 2024, "days": [{ "name": "国庆节", "date": "2024-10-01", "isOffDay": true }] }
//! ```

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{HolidayError, HolidayResult};
use crate::event::{Category, HolidayEvent};

pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/NateScarlet/holiday-cn/master/{year}.json";

pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(20);

/// Title prefix for compensatory workdays.
const WORKDAY_PREFIX: &str = "[Compensatory] ";

/// A single day entry as published by the feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHolidayRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "isOffDay")]
    pub is_off_day: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    days: Vec<RawHolidayRecord>,
}

/// Source of per-year statutory holiday records.
pub trait StatutoryFeed {
    fn fetch_year(&self, year: i32) -> HolidayResult<Vec<RawHolidayRecord>>;
}

/// Fetches the feed over HTTP with a bounded timeout and a single attempt.
pub struct HttpStatutoryFeed {
    client: reqwest::blocking::Client,
    url_template: String,
}

impl HttpStatutoryFeed {
    /// `url_template` must contain a `{year}` placeholder.
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> HolidayResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HolidayError::Feed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpStatutoryFeed {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn url_for(&self, year: i32) -> String {
        self.url_template.replace("{year}", &year.to_string())
    }
}

impl StatutoryFeed for HttpStatutoryFeed {
    fn fetch_year(&self, year: i32) -> HolidayResult<Vec<RawHolidayRecord>> {
        let url = self.url_for(year);
        debug!(%url, year, "Fetching statutory holiday feed");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| HolidayError::Feed(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HolidayError::Feed(format!("{} returned status {}", url, status)));
        }

        let body = response
            .text()
            .map_err(|e| HolidayError::Feed(format!("Failed to read response body: {}", e)))?;

        parse_feed(&body)
    }
}

/// Parse a feed document into its day records.
pub fn parse_feed(body: &str) -> HolidayResult<Vec<RawHolidayRecord>> {
    let document: FeedDocument =
        serde_json::from_str(body).map_err(|e| HolidayError::FeedParse(e.to_string()))?;
    Ok(document.days)
}

/// Convert feed records into statutory holiday / compensatory workday events.
///
/// Records without a date or a name are skipped. An unparseable date fails
/// the whole batch so a year is never half-imported.
pub fn events_from_records(records: &[RawHolidayRecord]) -> HolidayResult<Vec<HolidayEvent>> {
    let mut events = Vec::new();

    for record in records {
        let Some(date_str) = record.date.as_deref().filter(|d| !d.is_empty()) else {
            continue;
        };
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            HolidayError::FeedParse(format!("Invalid date '{}': {}", date_str, e))
        })?;

        let Some(name) = record.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };

        let event = if record.is_off_day.unwrap_or(false) {
            HolidayEvent::new(date, name, None, Category::StatutoryHoliday)
        } else {
            HolidayEvent::new(
                date,
                format!("{}{}", WORKDAY_PREFIX, name),
                None,
                Category::CompensatoryWorkday,
            )
        };
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn record(name: &str, date: &str, is_off_day: bool) -> RawHolidayRecord {
        RawHolidayRecord {
            name: Some(name.to_string()),
            date: Some(date.to_string()),
            is_off_day: Some(is_off_day),
        }
    }

    #[test]
    fn test_parse_feed_document() {
        let body = r#"{
            "$schema": "https://raw.githubusercontent.com/NateScarlet/holiday-cn/master/schema.json",
            "year": 2024,
            "papers": ["https://www.gov.cn/zhengce/content/202310/content_6911527.htm"],
            "days": [
                { "name": "国庆节", "date": "2024-10-01", "isOffDay": true },
                { "name": "国庆节", "date": "2024-10-12", "isOffDay": false }
            ]
        }"#;

        let records = parse_feed(body).unwrap();
        assert_eq!(
            records,
            vec![record("国庆节", "2024-10-01", true), record("国庆节", "2024-10-12", false)]
        );
    }

    #[test]
    fn test_parse_feed_without_days() {
        assert!(parse_feed(r#"{ "year": 2030 }"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        let err = parse_feed("<html>404</html>").unwrap_err();
        assert!(matches!(err, HolidayError::FeedParse(_)), "got {err:?}");
    }

    #[test]
    fn test_off_day_becomes_statutory_holiday() {
        let events = events_from_records(&[record("国庆节", "2024-10-01", true)]).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "国庆节");
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(events[0].category, Category::StatutoryHoliday);
    }

    #[test]
    fn test_working_day_becomes_compensatory_workday() {
        let events = events_from_records(&[record("国庆节", "2024-10-12", false)]).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "[Compensatory] 国庆节");
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2024, 10, 12).unwrap());
        assert_eq!(events[0].category, Category::CompensatoryWorkday);
    }

    #[test]
    fn test_records_without_name_or_date_are_skipped() {
        let records = vec![
            record("", "2024-10-01", true),
            record("", "2024-10-12", false),
            RawHolidayRecord {
                name: None,
                date: Some("2024-10-02".into()),
                is_off_day: Some(true),
            },
            RawHolidayRecord {
                name: Some("国庆节".into()),
                date: None,
                is_off_day: Some(true),
            },
        ];

        assert!(events_from_records(&records).unwrap().is_empty());
    }

    #[test]
    fn test_missing_off_day_flag_counts_as_workday() {
        let records = vec![RawHolidayRecord {
            name: Some("春节".into()),
            date: Some("2024-02-04".into()),
            is_off_day: None,
        }];

        let events = events_from_records(&records).unwrap();
        assert_eq!(events[0].category, Category::CompensatoryWorkday);
    }

    #[test]
    fn test_bad_date_fails_batch() {
        let records = vec![record("国庆节", "2024-10-01", true), record("国庆节", "2024/10/02", true)];

        let err = events_from_records(&records).unwrap_err();
        assert!(err.is_recoverable(), "bad feed data only skips the year: {err:?}");
    }

    #[test]
    fn test_url_for_year() {
        let feed = HttpStatutoryFeed::new(DEFAULT_FEED_URL, DEFAULT_FEED_TIMEOUT).unwrap();
        assert_eq!(
            feed.url_for(2025),
            "https://raw.githubusercontent.com/NateScarlet/holiday-cn/master/2025.json"
        );
    }

    /// Serve one canned HTTP response on a local port and return the URL template.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}/{{year}}.json", addr)
    }

    #[test]
    fn test_fetch_year_not_found_is_recoverable() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let feed = HttpStatutoryFeed::new(url, Duration::from_secs(5)).unwrap();

        let err = feed.fetch_year(2031).unwrap_err();
        assert!(matches!(err, HolidayError::Feed(_)), "got {err:?}");
        assert!(err.to_string().contains("404"), "got: {err}");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_fetch_year_success() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 28\r\nConnection: close\r\n\r\n{\"year\": 2031, \"days\": [ ] }",
        );
        let feed = HttpStatutoryFeed::new(url, Duration::from_secs(5)).unwrap();

        assert!(feed.fetch_year(2031).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_year_connection_refused_is_recoverable() {
        // Bind then drop to get a port nothing listens on
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let feed =
            HttpStatutoryFeed::new(format!("http://{}/{{year}}.json", addr), Duration::from_secs(1))
                .unwrap();

        let err = feed.fetch_year(2031).unwrap_err();
        assert!(matches!(err, HolidayError::Feed(_)), "got {err:?}");
        assert!(err.is_recoverable());
    }
}
