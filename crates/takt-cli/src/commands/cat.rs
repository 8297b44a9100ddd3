//! Cat command: list raw records.

use std::io::Write;

use anyhow::{Context, Result};
use takt_core::record::TIMESTAMP_FORMAT;
use takt_store::RecordStore;

use crate::style::Painter;
use crate::table;

/// Prints records newest first, optionally only the first `head`.
///
/// `head` of 0 prints just the table header.
pub fn run<W: Write>(
    writer: &mut W,
    store: &RecordStore,
    head: Option<usize>,
    painter: Painter,
) -> Result<()> {
    let records = match head {
        Some(n) => store.head(n),
        None => store.load(),
    }
    .with_context(|| format!("failed to read {}", store.path().display()))?;

    if records.is_empty() && head != Some(0) {
        writeln!(writer, "No records yet. Run 'takt check' to start.")?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                record.kind.to_string(),
                record.notes.clone(),
            ]
        })
        .collect();

    table::render(writer, &takt_store::HEADER, &rows, painter)?;
    Ok(())
}
