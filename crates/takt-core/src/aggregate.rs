//! Check-pair aggregation.
//!
//! Reduces a newest-first list of check records into per-period totals.
//! A pair is closed as soon as both an `in` and an `out` timestamp have been
//! seen since the last pair, whatever their chronological order; the
//! duration is `out - in` and may be negative for malformed files. Each pair
//! is grouped under the key of the record that closes it, which for a
//! newest-first file is the check-in.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::period::Period;
use crate::record::{Kind, Record};

/// Notes attached to an `out` record synthesized for an open interval.
pub const INFERRED_OUT_NOTES: &str = "Inferred by takt.";

/// Warning returned when the most recent record is an `in`.
pub const INFERRED_OUT_WARNING: &str = "NOTE: Last out was inferred using the current time.";

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours worked within one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    /// Group label produced by [`Period::key`].
    pub period_key: String,
    /// Sum of pair durations, in hours.
    pub total_hours: f64,
    /// Calendar dates that closed at least one pair.
    pub dates: BTreeSet<NaiveDate>,
    /// Non-empty notes of the records that closed a pair.
    pub notes: BTreeSet<String>,
}

impl AggregateRow {
    fn new(period_key: String) -> Self {
        Self {
            period_key,
            total_hours: 0.0,
            dates: BTreeSet::new(),
            notes: BTreeSet::new(),
        }
    }

    pub fn distinct_days(&self) -> usize {
        self.dates.len()
    }

    /// Average hours per distinct day, or `0.0` for a row without days.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_hours(&self) -> f64 {
        match self.distinct_days() {
            0 => 0.0,
            days => self.total_hours / days as f64,
        }
    }
}

/// Result of an aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    /// One row per period key, in the order the key was first seen.
    pub rows: Vec<AggregateRow>,
    /// Informational messages for the user, e.g. an inferred `out`.
    pub warnings: Vec<String>,
}

impl Aggregation {
    pub fn total_hours(&self) -> f64 {
        self.rows.iter().map(|row| row.total_hours).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Returns a closing `out` stamped `now` when the most recent record is an `in`.
pub fn infer_last_out(records: &[Record], now: NaiveDateTime) -> Option<Record> {
    match records.first() {
        Some(first) if first.kind == Kind::In => {
            Some(Record::new(now, Kind::Out, INFERRED_OUT_NOTES))
        }
        _ => None,
    }
}

/// Aggregates newest-first `records` into per-period rows.
///
/// `now` stamps the synthesized `out` if the last interval is still open.
/// `records` is never modified.
pub fn aggregate(records: &[Record], period: Period, now: NaiveDateTime) -> Aggregation {
    let mut warnings = Vec::new();
    let inferred = infer_last_out(records, now);
    if inferred.is_some() {
        tracing::debug!(%now, "last record is an in, inferring out");
        warnings.push(INFERRED_OUT_WARNING.to_string());
    }

    let mut rows: Vec<AggregateRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut last_in: Option<NaiveDateTime> = None;
    let mut last_out: Option<NaiveDateTime> = None;

    for record in inferred.iter().chain(records) {
        match record.kind {
            Kind::In => last_in = Some(record.timestamp),
            Kind::Out => last_out = Some(record.timestamp),
        }

        let (Some(start), Some(end)) = (last_in, last_out) else {
            continue;
        };

        let key = period.key(record.timestamp);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            rows.push(AggregateRow::new(key));
            rows.len() - 1
        });

        let row = &mut rows[slot];
        row.total_hours += hours_between(start, end);
        row.dates.insert(record.timestamp.date());
        row.notes.insert(record.notes.clone());

        last_in = None;
        last_out = None;
    }

    tracing::debug!(
        records = records.len(),
        %period,
        rows = rows.len(),
        "aggregated records"
    );

    Aggregation { rows, warnings }
}

/// Signed length of `start..end` in hours.
#[allow(clippy::cast_precision_loss)]
fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn check(kind: Kind, s: &str) -> Record {
        Record::new(at(s), kind, "")
    }

    fn now() -> NaiveDateTime {
        at("2030-01-01 00:00")
    }

    #[test]
    fn single_pair_same_day() {
        let records = vec![
            check(Kind::Out, "2022-01-02 08:00"),
            check(Kind::In, "2022-01-02 07:00"),
        ];

        let result = aggregate(&records, Period::Day, now());

        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.period_key, "2022-01-02");
        assert!((row.total_hours - 1.0).abs() < f64::EPSILON);
        assert_eq!(row.dates, BTreeSet::from([date("2022-01-02")]));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn pairs_in_same_week_merge() {
        // Monday and Tuesday of 2022-W01.
        let records = vec![
            check(Kind::Out, "2022-01-04 10:00"),
            check(Kind::In, "2022-01-04 09:00"),
            check(Kind::Out, "2022-01-03 10:00"),
            check(Kind::In, "2022-01-03 09:00"),
        ];

        let result = aggregate(&records, Period::Week, now());

        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.period_key, "2022-W01");
        assert!((row.total_hours - 2.0).abs() < f64::EPSILON);
        assert_eq!(row.distinct_days(), 2);
        assert!((row.average_hours() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn daily_rows_follow_scan_order() {
        let records = vec![
            check(Kind::Out, "2022-01-02 08:00"),
            check(Kind::In, "2022-01-02 07:00"),
            check(Kind::Out, "2022-01-01 06:00"),
            check(Kind::In, "2022-01-01 05:00"),
        ];

        let result = aggregate(&records, Period::Day, now());

        let keys: Vec<_> = result.rows.iter().map(|r| r.period_key.as_str()).collect();
        assert_eq!(keys, ["2022-01-02", "2022-01-01"]);
    }

    #[test]
    fn monthly_and_yearly_buckets() {
        let records = vec![
            check(Kind::Out, "2022-02-01 12:00"),
            check(Kind::In, "2022-02-01 08:00"),
            check(Kind::Out, "2022-01-31 12:00"),
            check(Kind::In, "2022-01-31 10:00"),
            check(Kind::Out, "2021-12-31 12:00"),
            check(Kind::In, "2021-12-31 11:00"),
        ];

        let monthly = aggregate(&records, Period::Month, now());
        let keys: Vec<_> = monthly.rows.iter().map(|r| r.period_key.as_str()).collect();
        assert_eq!(keys, ["2022-M02", "2022-M01", "2021-M12"]);

        let yearly = aggregate(&records, Period::Year, now());
        assert_eq!(yearly.rows.len(), 2);
        assert_eq!(yearly.rows[0].period_key, "2022");
        assert!((yearly.rows[0].total_hours - 6.0).abs() < f64::EPSILON);
        assert_eq!(yearly.rows[0].distinct_days(), 2);
        assert!((yearly.rows[0].average_hours() - 3.0).abs() < f64::EPSILON);
        assert_eq!(yearly.rows[1].period_key, "2021");
    }

    #[test]
    fn open_interval_infers_out_without_touching_input() {
        let records = vec![
            check(Kind::In, "2022-01-02 07:00"),
            check(Kind::Out, "2022-01-01 06:00"),
            check(Kind::In, "2022-01-01 05:00"),
        ];
        let before = records.clone();
        let now = at("2022-01-02 09:30");

        let result = aggregate(&records, Period::Day, now);

        assert_eq!(records, before);
        assert_eq!(result.warnings, [INFERRED_OUT_WARNING]);
        assert_eq!(result.rows[0].period_key, "2022-01-02");
        assert!((result.rows[0].total_hours - 2.5).abs() < f64::EPSILON);
        assert!((result.rows[1].total_hours - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn infer_last_out_only_for_open_interval() {
        let open = vec![check(Kind::In, "2022-01-02 07:00")];
        let closed = vec![check(Kind::Out, "2022-01-02 07:00")];

        let inferred = infer_last_out(&open, now()).unwrap();
        assert_eq!(inferred.kind, Kind::Out);
        assert_eq!(inferred.timestamp, now());
        assert_eq!(inferred.notes, INFERRED_OUT_NOTES);

        assert!(infer_last_out(&closed, now()).is_none());
        assert!(infer_last_out(&[], now()).is_none());
    }

    #[test]
    fn empty_input_is_empty_output() {
        let result = aggregate(&[], Period::Week, now());
        assert!(result.is_empty());
        assert!(result.warnings.is_empty());
        assert!(result.total_hours().abs() < f64::EPSILON);
    }

    #[test]
    fn same_kind_run_contributes_nothing() {
        let records = vec![
            check(Kind::Out, "2022-01-02 09:00"),
            check(Kind::Out, "2022-01-02 08:00"),
            check(Kind::Out, "2022-01-02 07:00"),
        ];

        let result = aggregate(&records, Period::Day, now());

        assert!(result.is_empty());
    }

    #[test]
    fn pairing_fires_when_both_set_even_if_malformed() {
        // Two consecutive ins: the newer one pairs with the out, the older
        // one is left dangling.
        let records = vec![
            check(Kind::Out, "2022-01-02 10:00"),
            check(Kind::In, "2022-01-02 09:00"),
            check(Kind::In, "2022-01-02 08:00"),
        ];

        let result = aggregate(&records, Period::Day, now());

        assert_eq!(result.rows.len(), 1);
        assert!((result.rows[0].total_hours - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pairing_after_misalignment_can_be_negative() {
        // After the doubled in, the next out is older than the pending in, so
        // the literal rule yields a negative duration.
        let records = vec![
            check(Kind::Out, "2022-01-02 12:00"),
            check(Kind::In, "2022-01-02 11:00"),
            check(Kind::In, "2022-01-02 09:00"),
            check(Kind::Out, "2022-01-02 08:00"),
            check(Kind::In, "2022-01-02 07:00"),
        ];

        let result = aggregate(&records, Period::Day, now());

        assert_eq!(result.rows.len(), 1);
        assert!(result.rows[0].total_hours.abs() < f64::EPSILON);
    }

    #[test]
    fn bucket_totals_sum_to_pair_durations() {
        let records = vec![
            check(Kind::Out, "2022-03-10 17:15"),
            check(Kind::In, "2022-03-10 13:00"),
            check(Kind::Out, "2022-03-10 12:00"),
            check(Kind::In, "2022-03-10 08:30"),
            check(Kind::Out, "2022-03-02 18:00"),
            check(Kind::In, "2022-03-02 09:00"),
        ];
        let expected = 4.25 + 3.5 + 9.0;

        for period in [Period::Day, Period::Week, Period::Month, Period::Year] {
            let result = aggregate(&records, period, now());
            assert!(
                (result.total_hours() - expected).abs() < 1e-9,
                "{period}: {}",
                result.total_hours()
            );
        }
    }

    #[test]
    fn notes_of_closing_records_are_collected() {
        let records = vec![
            Record::new(at("2022-01-02 12:00"), Kind::Out, "lunch"),
            Record::new(at("2022-01-02 08:00"), Kind::In, "standup"),
            Record::new(at("2022-01-01 12:00"), Kind::Out, ""),
            Record::new(at("2022-01-01 08:00"), Kind::In, ""),
        ];

        let result = aggregate(&records, Period::Year, now());

        assert_eq!(
            result.rows[0].notes,
            BTreeSet::from([String::new(), "standup".to_string()])
        );
    }

    #[test]
    fn pair_across_midnight_lands_on_check_in_day() {
        let records = vec![
            check(Kind::Out, "2022-01-02 01:00"),
            check(Kind::In, "2022-01-01 23:00"),
        ];

        let result = aggregate(&records, Period::Day, now());

        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.period_key, "2022-01-01");
        assert!((row.total_hours - 2.0).abs() < f64::EPSILON);
        assert_eq!(row.dates, BTreeSet::from([date("2022-01-01")]));
    }

    #[test]
    fn pair_across_week_and_month_boundary_uses_check_in_key() {
        // Saturday 2022-01-01 is in W00, Sunday 2022-01-02 starts W01.
        let records = vec![
            check(Kind::Out, "2022-01-02 01:00"),
            check(Kind::In, "2022-01-01 23:00"),
        ];
        let week = aggregate(&records, Period::Week, now());
        assert_eq!(week.rows.len(), 1);
        assert_eq!(week.rows[0].period_key, "2022-W00");

        let records = vec![
            check(Kind::Out, "2022-02-01 02:30"),
            check(Kind::In, "2022-01-31 22:00"),
        ];
        let month = aggregate(&records, Period::Month, now());
        assert_eq!(month.rows.len(), 1);
        assert_eq!(month.rows[0].period_key, "2022-M01");
        assert!((month.rows[0].total_hours - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn average_of_row_without_days_is_zero() {
        let row = AggregateRow::new("2022".to_string());
        assert!(row.average_hours().abs() < f64::EPSILON);
    }
}
