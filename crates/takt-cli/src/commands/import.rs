//! Import command for merging records from another CSV file.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use takt_store::RecordStore;

use crate::style::{GREEN, Painter, RED};

/// Places the records of `source` above the existing ones.
///
/// Import failures are printed and swallowed; only output errors propagate.
pub fn run<W: Write>(
    writer: &mut W,
    store: &RecordStore,
    source: &Path,
    painter: Painter,
) -> Result<()> {
    match store.import_from(source) {
        Ok(imported) => {
            let message = format!(
                "Imported {imported} records from {} to {}.",
                source.display(),
                store.path().display()
            );
            writeln!(writer, "{}", painter.paint(GREEN, &message))?;
        }
        Err(e) => {
            tracing::debug!(error = ?e, "import failed");
            writeln!(writer, "{}", painter.paint(RED, &format!("Error: {e}")))?;
        }
    }
    Ok(())
}
