//! Error types for holiday calendar generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or writing the holiday calendar.
#[derive(Error, Debug)]
pub enum HolidayError {
    #[error("Source file not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Holiday feed error: {0}")]
    Feed(String),

    #[error("Holiday feed parse error: {0}")]
    FeedParse(String),

    #[error("Rule table error: {0}")]
    RuleParse(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HolidayError {
    /// Whether a pass hitting this error should be skipped rather than abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HolidayError::SourceMissing(_) | HolidayError::Feed(_) | HolidayError::FeedParse(_)
        )
    }
}

/// Result type alias for holiday calendar operations.
pub type HolidayResult<T> = Result<T, HolidayError>;
