//! Core domain logic for takt.
//!
//! This crate contains the fundamental types and logic for:
//! - Records: timestamped `in`/`out` checks
//! - Periods: day, week, month and year group keys
//! - Aggregation: reducing check pairs into hours per period
//! - Formatting: rendering hour totals

pub mod aggregate;
pub mod format;
pub mod period;
pub mod record;

pub use aggregate::{AggregateRow, Aggregation, aggregate, infer_last_out};
pub use format::{DurationStyle, format_text, format_time};
pub use period::Period;
pub use record::{Kind, Record, TimestampError, UnknownKind, parse_timestamp};
