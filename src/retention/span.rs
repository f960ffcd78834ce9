//! Retention span strings
//!
//! Rule windows are written as an integer followed by a unit: `h` hours,
//! `d` days, `w` weeks or `y` years of 365 days (`"36h"`, `"32d"`, `"5y"`).

use chrono::TimeDelta;

use crate::error::{SnapkeepError, SnapkeepResult};

/// Parse a span string such as `"32d"`
pub fn parse_span(s: &str) -> SnapkeepResult<TimeDelta> {
    let s = s.trim();
    let invalid = || {
        SnapkeepError::Config(format!(
            "Invalid span '{}': expected a number followed by h, d, w or y",
            s
        ))
    };

    let unit = s.chars().last().ok_or_else(invalid)?;
    let digits = &s[..s.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let count: i64 = digits.parse().map_err(|_| invalid())?;

    let span = match unit {
        'h' => TimeDelta::try_hours(count),
        'd' => TimeDelta::try_days(count),
        'w' => count.checked_mul(7).and_then(TimeDelta::try_days),
        'y' => count.checked_mul(365).and_then(TimeDelta::try_days),
        _ => return Err(invalid()),
    };

    span.ok_or_else(|| SnapkeepError::Config(format!("Span '{}' is too large", s)))
}

/// Render a span in the most natural unit that divides it exactly
pub fn format_span(span: TimeDelta) -> String {
    let hours = span.num_hours();
    if span != TimeDelta::hours(hours) {
        return format!("{}s", span.num_seconds());
    }
    if hours % 24 != 0 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days != 0 && days % 365 == 0 {
        format!("{}y", days / 365)
    } else if days != 0 && days % 7 == 0 {
        format!("{}w", days / 7)
    } else {
        format!("{}d", days)
    }
}
