//! Check records as stored in the record file.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format used when writing timestamps back to the record file.
///
/// `%.f` prints nothing for whole seconds, so records created by `check`
/// round-trip as `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Naive layouts accepted on read, tried in order after RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Whether a check opened or closed a work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    In,
    Out,
}

impl Kind {
    /// String representation used in the record file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// The kind the next check should record.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

impl Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error for a `kind` column that is neither `in` nor `out`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown record kind: {0:?} (expected \"in\" or \"out\")")]
pub struct UnknownKind(String);

/// Error for a timestamp in none of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp: {0:?}")]
pub struct TimestampError(String);

/// Parses a record timestamp.
///
/// Accepts RFC 3339 (converted to local time), `YYYY-MM-DD HH:MM[:SS[.f]]`
/// with either a space or `T` separator, and a bare date (midnight).
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimestampError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| TimestampError(s.to_string()))
}

/// A single check in or out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Local wall-clock time of the check.
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
    pub kind: Kind,
    /// Free text; empty when the user gave none.
    #[serde(default)]
    pub notes: String,
}

impl Record {
    pub fn new(timestamp: NaiveDateTime, kind: Kind, notes: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind,
            notes: notes.into(),
        }
    }
}

mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{TIMESTAMP_FORMAT, parse_timestamp};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}
