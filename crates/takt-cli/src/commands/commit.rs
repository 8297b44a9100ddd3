//! Commit command: record the file in its enclosing git repository.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use crate::style::{GREEN, Painter, RED};

/// Walks up from `start` to the first directory containing `.git`.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Runs `git add` and `git commit` for `file`.
///
/// A file outside any repository, or a failing git step, is reported and
/// the command still succeeds.
pub fn run<W: Write>(writer: &mut W, file: &Path, message: &str, painter: Painter) -> Result<()> {
    let file = std::path::absolute(file)
        .with_context(|| format!("failed to resolve {}", file.display()))?;
    let start = file.parent().unwrap_or(file.as_path());

    let Some(root) = find_git_root(start) else {
        writeln!(writer, "No git repository found.")?;
        return Ok(());
    };
    tracing::debug!(root = %root.display(), "found git repository");

    let steps: [(&str, Vec<&std::ffi::OsStr>); 2] = [
        ("add", vec![file.as_os_str()]),
        ("commit", vec!["-m".as_ref(), message.as_ref()]),
    ];
    for (step, args) in steps {
        let output = Command::new("git")
            .arg("-C")
            .arg(&root)
            .arg(step)
            .args(args)
            .output()
            .with_context(|| format!("failed to run git {step}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            let text = format!("Error: git {step} failed: {}", detail.trim());
            writeln!(writer, "{}", painter.paint(RED, &text))?;
            return Ok(());
        }
    }

    let text = format!("Committed {} in {}.", file.display(), root.display());
    writeln!(writer, "{}", painter.paint(GREEN, &text))?;
    Ok(())
}
