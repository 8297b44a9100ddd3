//! Period granularities and the keys records are grouped under.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};

/// Granularity of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Returns the group label for `timestamp`.
    ///
    /// - `Day`: `2024-01-07`
    /// - `Week`: `2024-W01` (Sunday-based, see [`week_of_year`])
    /// - `Month`: `2024-M01`
    /// - `Year`: `2024`
    pub fn key(self, timestamp: NaiveDateTime) -> String {
        let date = timestamp.date();
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Week => format!("{}-W{:02}", date.year(), week_of_year(timestamp)),
            Self::Month => format!("{}-M{:02}", date.year(), date.month()),
            Self::Year => date.year().to_string(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Week number with Sunday as the first day of the week.
///
/// Days before the first Sunday of the year fall in week 0, so the value
/// ranges over `0..=53`. This is the `%U` convention of `strftime`, not ISO
/// 8601 week numbering.
pub fn week_of_year(timestamp: NaiveDateTime) -> u32 {
    let date = timestamp.date();
    (date.ordinal0() + 7 - date.weekday().num_days_from_sunday()) / 7
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
