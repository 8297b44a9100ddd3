//! Human-readable hour durations.

use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// How hour totals are rendered in summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// `HH:MM`, see [`format_time`].
    #[default]
    Clock,
    /// `1h30m` / `2d03h15m`, see [`format_text`].
    Text,
}

impl DurationStyle {
    pub fn format(self, hours: f64) -> String {
        match self {
            Self::Clock => format_time(hours),
            Self::Text => format_text(hours),
        }
    }
}

/// Formats hours as `HH:MM`.
///
/// Both parts are truncated toward zero and padded to two digits, so
/// `1.5` is `01:30` and `0.999` is `00:59`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_time(hours: f64) -> String {
    let whole = hours.trunc();
    let h = whole as i64;
    let m = ((hours - whole) * 60.0) as i64;
    format!("{h:02}:{m:02}")
}

/// Formats hours as `XhYYm`, switching to `XdYYhZZm` above one day.
///
/// Minutes are rounded. Zero and negative totals render as `00h00m`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_text(hours: f64) -> String {
    if hours <= 0.0 {
        return "00h00m".to_string();
    }

    let total_minutes = (hours * 60.0).round() as i64;
    if hours <= 24.0 {
        format!("{}h{:02}m", total_minutes / 60, total_minutes % 60)
    } else {
        let days = total_minutes / MINUTES_PER_DAY;
        let rest = total_minutes % MINUTES_PER_DAY;
        format!("{days}d{:02}h{:02}m", rest / 60, rest % 60)
    }
}
