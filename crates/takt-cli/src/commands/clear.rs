//! Clear command.

use std::io::Write;

use anyhow::{Context, Result};
use takt_store::RecordStore;

use crate::style::{Painter, RED};

/// Removes every record from the file.
pub fn run<W: Write>(writer: &mut W, store: &RecordStore, painter: Painter) -> Result<()> {
    store
        .clear()
        .with_context(|| format!("failed to clear {}", store.path().display()))?;
    writeln!(writer, "{}", painter.paint(RED, "All records have been cleared."))?;
    Ok(())
}
