//! Calendar month values
//!
//! `YearMonth` is the bucket used by monthly trends and budget checks.
//! Field order makes the derived ordering chronological.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month, returning None for a month outside 1-12 or a year
    /// outside the calendar's range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let years = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        if (1..=12).contains(&month) && years.contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month, if the calendar can represent it
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> Option<NaiveDate> {
        match self.next().first_day() {
            Some(next) => next.pred_opt(),
            None if self.year == NaiveDate::MAX.year() && self.month == 12 => {
                Some(NaiveDate::MAX)
            }
            None => None,
        }
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Step back `count` months, or None past the start of the calendar
    pub fn back(&self, count: usize) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let target = index.checked_sub(i64::try_from(count).ok()?)?;
        let year = i32::try_from(target.div_euclid(12)).ok()?;
        let month = u32::try_from(target.rem_euclid(12) + 1).ok()?;
        Self::new(year, month)
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Self::new(year, month).ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month format: '{}'. Use YYYY-MM", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}
