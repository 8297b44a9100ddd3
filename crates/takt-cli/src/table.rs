//! Plain-text tables.

use std::io::{self, Write};

use crate::style::{BOLD_MAGENTA, Painter};

const COLUMN_GAP: &str = "  ";

/// Writes `rows` under `headers` with left-aligned, space-padded columns.
///
/// Widths are counted in chars. Lines carry no trailing whitespace.
pub fn render<W: Write>(
    writer: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
    painter: Painter,
) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = join_padded(headers.iter().copied(), &widths);
    writeln!(writer, "{}", painter.paint(BOLD_MAGENTA, &header))?;

    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    writeln!(writer, "{}", rule.join(COLUMN_GAP))?;

    for row in rows {
        writeln!(writer, "{}", join_padded(row.iter().map(String::as_str), &widths))?;
    }

    Ok(())
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}
