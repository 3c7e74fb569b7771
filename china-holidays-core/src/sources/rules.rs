//! Fixed-date and lunar-date rule tables.
//!
//! Both tables are CSV files with a header row. The `description` column is
//! optional. A missing file is reported as [`HolidayError::SourceMissing`] so
//! the caller can skip the pass; a malformed row is a [`HolidayError::RuleParse`].

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{HolidayError, HolidayResult};

/// A Gregorian month/day observed every year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixedHolidayRule {
    pub name: String,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// A lunar month/day observed every lunar year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LunarHolidayRule {
    pub name: String,
    pub lunar_month: u8,
    pub lunar_day: u8,
    #[serde(default)]
    pub description: Option<String>,
}

pub fn load_fixed_rules(path: &Path) -> HolidayResult<Vec<FixedHolidayRule>> {
    load_table(path)
}

pub fn load_lunar_rules(path: &Path) -> HolidayResult<Vec<LunarHolidayRule>> {
    load_table(path)
}

fn load_table<T: DeserializeOwned>(path: &Path) -> HolidayResult<Vec<T>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HolidayError::SourceMissing(path.to_path_buf()),
        _ => HolidayError::Io(e),
    })?;

    parse_table(file).map_err(|e| match e {
        HolidayError::RuleParse(msg) => {
            HolidayError::RuleParse(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse CSV rows with headers into rules, preserving row order.
pub fn parse_table<T: DeserializeOwned, R: Read>(reader: R) -> HolidayResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize()
        .map(|row| row.map_err(|e| HolidayError::RuleParse(e.to_string())))
        .collect()
}
