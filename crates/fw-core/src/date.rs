//! Simulation dates are stored as a whole number of days since the common
//! era so that era containment is exact integer comparison. The calendar
//! only appears at the edges (parsing config, display, the current year).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A simulated calendar day, stored as days from 0001-01-01 (day 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "NaiveDate", into = "NaiveDate")]
pub struct SimDate(i32);

impl SimDate {
    /// Build a date from a proleptic Gregorian year, month, and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .ok_or_else(|| CoreError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Wrap a raw day count.
    pub fn from_day_count(days: i32) -> Self {
        Self(days)
    }

    /// The raw day count.
    pub fn day_count(self) -> i32 {
        self.0
    }

    /// Move forward (or backward, for negative `days`) by a number of days.
    pub fn add_days(self, days: i32) -> Self {
        Self(self.0.saturating_add(days))
    }

    /// Number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: SimDate) -> i64 {
        i64::from(self.0) - i64::from(earlier.0)
    }

    /// Convert to a calendar date, saturating at chrono's supported range.
    pub fn to_naive(self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.0).unwrap_or(if self.0 < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
    }

    /// The calendar year this day falls in.
    pub fn year(self) -> i32 {
        self.to_naive().year()
    }
}

impl From<NaiveDate> for SimDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.num_days_from_ce())
    }
}

impl From<SimDate> for NaiveDate {
    fn from(date: SimDate) -> Self {
        date.to_naive()
    }
}

impl FromStr for SimDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from)
            .map_err(|_| CoreError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive().format("%Y-%m-%d"))
    }
}
