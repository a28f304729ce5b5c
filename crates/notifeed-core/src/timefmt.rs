//! Relative-age labels for notification timestamps.

use chrono::{DateTime, Local, Utc};

/// Default absolute date pattern (US short date, e.g. `3/14/2026`).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Formats `at` relative to `now`.
///
/// - under an hour: `"<m>m ago"`
/// - under a day: `"<h>h ago"`
/// - otherwise: the local calendar date rendered with `date_format`
///
/// Timestamps in the future count as zero minutes old.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>, date_format: &str) -> String {
    let minutes = now.signed_duration_since(at).num_minutes().max(0);

    if minutes < MINUTES_PER_HOUR {
        format!("{minutes}m ago")
    } else if minutes < MINUTES_PER_DAY {
        format!("{}h ago", minutes / MINUTES_PER_HOUR)
    } else {
        at.with_timezone(&Local).format(date_format).to_string()
    }
}
