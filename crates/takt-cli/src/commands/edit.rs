//! Edit command: open the record file in an editor.

use std::io::{self, Write};
use std::process::Command;

use anyhow::{Context, Result};
use takt_store::RecordStore;

use crate::style::{Painter, RED};

/// Opens the record file in `editor`, creating the file first if needed.
///
/// A missing editor binary is reported, not treated as an error.
pub fn run<W: Write>(
    writer: &mut W,
    store: &RecordStore,
    editor: &str,
    painter: Painter,
) -> Result<()> {
    if store
        .ensure_exists()
        .with_context(|| format!("failed to create {}", store.path().display()))?
    {
        tracing::info!(path = %store.path().display(), "created record file");
    }

    tracing::debug!(editor, path = %store.path().display(), "launching editor");
    match Command::new(editor).arg(store.path()).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            tracing::warn!(editor, %status, "editor exited with failure");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let message =
                format!("`{editor}` not found, check if it is installed and accessible.");
            writeln!(writer, "{}", painter.paint(RED, &message))?;
        }
        Err(e) => return Err(e).with_context(|| format!("failed to run {editor}")),
    }

    Ok(())
}
