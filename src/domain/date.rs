use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The one textual date layout a ledger accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// YYYY-MM-DD
    #[default]
    Iso,
    /// DD/MM/YYYY
    #[serde(rename = "dmy")]
    DayMonthYear,
}

impl DateFormat {
    /// chrono format string
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DayMonthYear => "%d/%m/%Y",
        }
    }

    /// Human-readable layout, used in error messages.
    pub fn layout(&self) -> &'static str {
        match self {
            DateFormat::Iso => "YYYY-MM-DD",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
        }
    }

    pub fn separator(&self) -> char {
        match self {
            DateFormat::Iso => '-',
            DateFormat::DayMonthYear => '/',
        }
    }

    /// Input must consist of digits and the layout's separator only: no
    /// padding, no sign.
    pub fn parse(&self, input: &str) -> Option<NaiveDate> {
        let sep = self.separator();
        if !input.chars().all(|c| c.is_ascii_digit() || c == sep) {
            return None;
        }
        NaiveDate::parse_from_str(input, self.pattern()).ok()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layout())
    }
}

impl FromStr for DateFormat {
    type Err = ParseDateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iso" | "yyyy-mm-dd" => Ok(DateFormat::Iso),
            "dmy" | "dd/mm/yyyy" => Ok(DateFormat::DayMonthYear),
            _ => Err(ParseDateFormatError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDateFormatError(pub String);

impl fmt::Display for ParseDateFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown date format '{}', expected 'iso' or 'dmy'", self.0)
    }
}

impl std::error::Error for ParseDateFormatError {}
