//! ANSI styling for terminal output.

pub const RESET: &str = "\x1b[0m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BOLD_MAGENTA: &str = "\x1b[1;35m";

/// Wraps text in ANSI codes, or passes it through when styling is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A painter that never emits escape codes.
    pub const fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
