use chrono::{DateTime, Utc};

/// `m:ss` for the session clocks; minutes are unbounded.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}
