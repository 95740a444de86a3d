//! Calendar-month arithmetic used by persistence and cost aggregation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month '{0}', expected MM-YYYY")]
pub struct MonthParseError(pub String);

/// Years that survive a round-trip through `MM-YYYY` and a Postgres `DATE`.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// `None` for an invalid month or a year outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Truncates a date to its month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Next calendar month, `None` past the end of the representable range.
    pub fn succ(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    pub fn add_years(self, years: u32) -> Option<Self> {
        self.0
            .checked_add_months(Months::new(years.saturating_mul(12)))
            .map(Self)
    }

    /// Every month from `self` through `last`, both inclusive.
    /// Empty when `last` is before `self`.
    pub fn through(self, last: YearMonth) -> MonthRange {
        MonthRange {
            next: (self <= last).then_some(self),
            last,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

impl FromStr for YearMonth {
    type Err = MonthParseError;

    /// Accepts `MM-YYYY`, `YYYY-MM` and full `YYYY-MM-DD` dates, zero-padded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || MonthParseError(raw.to_string());

        let parts: Vec<&str> = raw.split('-').collect();
        if parts.iter().any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit())) {
            return Err(invalid());
        }

        let lengths: Vec<usize> = parts.iter().map(|part| part.len()).collect();
        let (year, month, day) = match lengths.as_slice() {
            [2, 4] => (parts[1], parts[0], None),
            [4, 2] => (parts[0], parts[1], None),
            [4, 2, 2] => (parts[0], parts[1], Some(parts[2])),
            _ => return Err(invalid()),
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let parsed = Self::new(year, month).ok_or_else(invalid)?;

        if let Some(day) = day {
            let day: u32 = day.parse().map_err(|_| invalid())?;
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        }

        Ok(parsed)
    }
}

/// Iterator over consecutive calendar months, stepping one month at a time.
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: Option<YearMonth>,
    last: YearMonth,
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<YearMonth> {
        let current = self.next?;
        self.next = current.succ().filter(|m| *m <= self.last);
        Some(current)
    }
}
