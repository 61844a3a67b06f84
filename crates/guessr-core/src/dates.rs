//! Best-effort extraction of a play date from pasted share text.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday),?\s+(\w+)\s+(\d+),?\s+(\d{4})",
    )
    .unwrap()
});

/// Look for a "Wednesday, Feb 18, 2026"-style date anywhere in the text.
/// Returns `None` when no date is present or the values do not form a real
/// calendar date; callers fall back to today. Only abbreviated month names
/// are recognized, and the weekday word is not checked against the date.
pub fn extract_play_date(text: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(text)?;
    let formatted = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
    NaiveDate::parse_from_str(&formatted, "%b %d %Y").ok()
}
