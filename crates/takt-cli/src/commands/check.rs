//! Check command: toggle between in and out.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use takt_core::{Kind, Record};
use takt_store::RecordStore;

use crate::style::{BOLD_MAGENTA, GREEN, Painter};

/// Records a check at `now` and returns it.
///
/// The kind is `in` for an empty file or after an `out`, and `out` otherwise.
pub fn run<W: Write>(
    writer: &mut W,
    store: &RecordStore,
    notes: &str,
    now: NaiveDateTime,
    painter: Painter,
) -> Result<Record> {
    let last = store
        .first()
        .with_context(|| format!("failed to read {}", store.path().display()))?;
    let kind = last.map_or(Kind::In, |record| record.kind.toggled());

    let record = Record::new(now, kind, notes);
    store
        .prepend(record.clone())
        .with_context(|| format!("failed to write {}", store.path().display()))?;
    tracing::debug!(%kind, %now, "checked");

    // Painted in segments: a nested reset would end the outer colour.
    let when = record.timestamp.format("%Y-%m-%d %H:%M:%S");
    writeln!(
        writer,
        "{}{}{}",
        painter.paint(GREEN, "Check "),
        painter.paint(BOLD_MAGENTA, &kind.as_str().to_uppercase()),
        painter.paint(GREEN, &format!(" at {when}"))
    )?;

    Ok(record)
}
