use std::fmt;

use serde::Serialize;

use super::Cents;

/// Calendar month key in "YYYY-MM" form, used as the partition key for
/// expenses and month configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// Parse and validate a month key.
    /// Example: "2024-05" is valid; "2024-13" and "24-05" are not.
    pub fn parse(input: &str) -> Result<Self, ParseMonthError> {
        let input = input.trim();
        let (year, month) = input
            .split_once('-')
            .ok_or(ParseMonthError::InvalidFormat)?;

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMonthError::InvalidFormat);
        }
        if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMonthError::InvalidFormat);
        }

        let month_num: u32 = month.parse().map_err(|_| ParseMonthError::InvalidFormat)?;
        if !(1..=12).contains(&month_num) {
            return Err(ParseMonthError::MonthOutOfRange);
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMonthError {
    InvalidFormat,
    MonthOutOfRange,
}

impl fmt::Display for ParseMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMonthError::InvalidFormat => write!(f, "expected a month key like 2024-05"),
            ParseMonthError::MonthOutOfRange => write!(f, "month must be between 01 and 12"),
        }
    }
}

impl std::error::Error for ParseMonthError {}

/// Per-month configuration: income and the closed flag.
/// The row is created lazily on first write; a missing row means an open
/// month with zero income.
#[derive(Debug, Clone, Serialize)]
pub struct MonthConfig {
    pub month: MonthKey,
    pub income_cents: Cents,
    pub closed: bool,
}

/// Append-only audit record written when a month is closed.
#[derive(Debug, Clone, Serialize)]
pub struct ExportLogEntry {
    pub id: i64,
    pub month: MonthKey,
    pub exported_at: String,
    pub status: String,
}

impl ExportLogEntry {
    /// Status recorded when a month close succeeds.
    pub const STATUS_EXPORTED: &'static str = "EXPORTED";
}
