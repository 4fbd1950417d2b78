use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::money::Amount;

/// Day-first statement date layouts, separated by `.` or `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    /// `dd.mm.yy`
    ShortYear,
    /// `dd.mm.yyyy`
    LongYear,
}

impl DateFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::ShortYear => "dd.mm.yy",
            DateFormat::LongYear => "dd.mm.yyyy",
        }
    }

    fn year_digits(self) -> usize {
        match self {
            DateFormat::ShortYear => 2,
            DateFormat::LongYear => 4,
        }
    }

    fn chrono_format(self) -> &'static str {
        match self {
            DateFormat::ShortYear => "%d.%m.%y",
            DateFormat::LongYear => "%d.%m.%Y",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("Invalid date '{0}' for format {1}")]
    InvalidDate(String, DateFormat),
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),
}

/// Internal date layout of the host application.
pub const INTERNAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a statement date written in `format`.
///
/// The year must have exactly the digit count of `format`; a two-digit year
/// resolves to 1970..=2069.
pub fn to_internal_date(text: &str, format: DateFormat) -> Result<NaiveDate, ConvertError> {
    let invalid = || ConvertError::InvalidDate(text.to_string(), format);
    let s = text.trim();

    let year = s.rsplit(|c: char| c == '.' || c == '-').next().ok_or_else(invalid)?;
    if year.len() != format.year_digits() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let unified = s.replace('-', ".");
    NaiveDate::parse_from_str(&unified, format.chrono_format()).map_err(|_| invalid())
}

/// Formats a date in the host's internal layout.
pub fn format_internal_date(date: NaiveDate) -> String {
    date.format(INTERNAL_DATE_FORMAT).to_string()
}

/// Parses a number that already uses `.` as decimal mark.
///
/// Surrounding whitespace, a leading `+` and apostrophe or space grouping
/// (`1'234.50`, `1 234.50`) are accepted.
pub fn to_internal_number(text: &str) -> Result<Amount, ConvertError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | ' ' | '\u{a0}'))
        .collect();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned.as_str());

    if cleaned.is_empty() {
        return Err(ConvertError::InvalidNumber(text.to_string()));
    }

    Decimal::from_str(cleaned)
        .map(Amount::from_decimal)
        .map_err(|_| ConvertError::InvalidNumber(text.to_string()))
}
