//! Summary commands: hours per day, week, month or year.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use takt_core::{Aggregation, DurationStyle, Period, aggregate};
use takt_store::RecordStore;

use crate::style::{Painter, YELLOW};
use crate::table;

const HEADERS: [&str; 4] = ["Date", "Hours", "N.Days", "Avg Hours"];

/// Options shared by the summary commands.
#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    pub period: Period,
    /// Maximum rows to show; 0 shows all.
    pub limit: usize,
    pub style: DurationStyle,
}

/// Aggregates the record file and prints the summary table.
///
/// `now` closes an interval that is still open; the file is not changed.
pub fn run<W: Write>(
    writer: &mut W,
    store: &RecordStore,
    options: SummaryOptions,
    now: NaiveDateTime,
    painter: Painter,
) -> Result<()> {
    let records = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;
    let aggregation = aggregate(&records, options.period, now);
    render(writer, &aggregation, options, painter)?;
    Ok(())
}

/// Prints an aggregation followed by its warnings.
pub fn render<W: Write>(
    writer: &mut W,
    aggregation: &Aggregation,
    options: SummaryOptions,
    painter: Painter,
) -> std::io::Result<()> {
    if aggregation.is_empty() {
        writeln!(writer, "No completed check pairs yet.")?;
    } else {
        let limit = match options.limit {
            0 => aggregation.rows.len(),
            n => n,
        };
        let rows: Vec<Vec<String>> = aggregation
            .rows
            .iter()
            .take(limit)
            .map(|row| {
                vec![
                    row.period_key.clone(),
                    options.style.format(row.total_hours),
                    row.distinct_days().to_string(),
                    options.style.format(row.average_hours()),
                ]
            })
            .collect();
        table::render(writer, &HEADERS, &rows, painter)?;
    }

    for warning in &aggregation.warnings {
        writeln!(writer, "{}", painter.paint(YELLOW, warning))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use takt_core::{Kind, Record};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new(at("2022-01-04 17:45"), Kind::Out, ""),
            Record::new(at("2022-01-04 09:00"), Kind::In, ""),
            Record::new(at("2022-01-03 12:00"), Kind::Out, ""),
            Record::new(at("2022-01-03 09:00"), Kind::In, ""),
            Record::new(at("2022-01-01 11:30"), Kind::Out, ""),
            Record::new(at("2022-01-01 10:00"), Kind::In, ""),
        ]
    }

    fn options(period: Period) -> SummaryOptions {
        SummaryOptions {
            period,
            limit: 0,
            style: DurationStyle::Clock,
        }
    }

    fn rendered(records: &[Record], options: SummaryOptions, now: NaiveDateTime) -> String {
        let aggregation = aggregate(records, options.period, now);
        let mut out = Vec::new();
        render(&mut out, &aggregation, options, Painter::plain()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn daily_summary() {
        let output = rendered(&sample_records(), options(Period::Day), at("2022-02-01 00:00"));
        assert_snapshot!(output, @r"
Date        Hours  N.Days  Avg Hours
----------  -----  ------  ---------
2022-01-04  08:45  1       08:45
2022-01-03  03:00  1       03:00
2022-01-01  01:30  1       01:30
");
    }

    #[test]
    fn weekly_summary_merges_days() {
        let output = rendered(&sample_records(), options(Period::Week), at("2022-02-01 00:00"));
        assert_snapshot!(output, @r"
Date      Hours  N.Days  Avg Hours
--------  -----  ------  ---------
2022-W01  11:45  2       05:52
2022-W00  01:30  1       01:30
");
    }

    #[test]
    fn text_style_and_limit() {
        let options = SummaryOptions {
            period: Period::Day,
            limit: 1,
            style: DurationStyle::Text,
        };
        let output = rendered(&sample_records(), options, at("2022-02-01 00:00"));
        assert_eq!(
            output,
            "Date        Hours  N.Days  Avg Hours\n\
             ----------  -----  ------  ---------\n\
             2022-01-04  8h45m  1       8h45m\n"
        );
    }

    #[test]
    fn open_interval_prints_warning_after_table() {
        let records = vec![Record::new(at("2022-01-04 09:00"), Kind::In, "")];
        let output = rendered(&records, options(Period::Day), at("2022-01-04 10:30"));
        assert_snapshot!(output, @r"
Date        Hours  N.Days  Avg Hours
----------  -----  ------  ---------
2022-01-04  01:30  1       01:30
NOTE: Last out was inferred using the current time.
");
    }

    #[test]
    fn empty_summary() {
        let output = rendered(&[], options(Period::Month), at("2022-02-01 00:00"));
        assert_eq!(output, "No completed check pairs yet.\n");
    }

    #[test]
    fn run_reads_store_without_modifying_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("takt.csv");
        let contents = "timestamp,kind,notes\n2022-01-04 09:00:00,in,\n";
        std::fs::write(&path, contents).unwrap();
        let store = RecordStore::new(&path);
        let mut out = Vec::new();

        run(
            &mut out,
            &store,
            options(Period::Year),
            at("2022-01-04 11:00"),
            Painter::plain(),
        )
        .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("2022  02:00  1       02:00"), "{output}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    }
}
