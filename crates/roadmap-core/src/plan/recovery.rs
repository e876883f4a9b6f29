//! Partial recovery for payloads that do not parse as a whole document.
//!
//! The usual culprit is truncation: the model stopped emitting tokens before
//! the closing brackets, so strict parsing fails even though a prefix of the
//! day entries is intact. Recovery pattern-matches `day` / `title` /
//! `description` runs in text order and never needs balanced braces.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::parser::{default_day, positive_day};
use super::types::{
    CandidatePlan, DEFAULT_DESCRIPTION, DEFAULT_DURATION, DayEntry, default_tips, default_title,
};

/// A JSON string body, escapes included, without the surrounding quotes.
const STRING_BODY: &str = r#"((?:[^"\\]|\\.)*)"#;

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#""(?:day|day_index|dayIndex)"\s*:\s*"?(-?\d+)"?\s*,\s*"title"\s*:\s*"{STRING_BODY}"(?:\s*,\s*"description"\s*:\s*"{STRING_BODY}")?"#
    );
    Regex::new(&pattern).expect("entry pattern is valid")
});

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""(?:estimatedDays|estimated_days|estimated_duration|estimatedDuration)"\s*:\s*"?(-?\d+)"#,
    )
    .expect("duration pattern is valid")
});

/// Recover whatever complete entries `text` contains.
///
/// Tips are never recovered: they are the field most likely to be mangled
/// by truncation, so every recovered entry carries the default tip list.
pub fn recover(text: &str) -> CandidatePlan {
    let entries: Vec<DayEntry> = ENTRY_PATTERN
        .captures_iter(text)
        .enumerate()
        .filter_map(|(i, caps)| {
            let position = i + 1;
            let entry = entry_from_captures(position, &caps);
            if entry.is_none() {
                debug!(position, "skipping malformed entry fragment");
            }
            entry
        })
        .collect();

    let duration = recover_duration(text);
    debug!(
        recovered_entries = entries.len(),
        duration = ?duration,
        "partial recovery finished"
    );

    CandidatePlan {
        estimated_duration: duration.unwrap_or(i64::from(DEFAULT_DURATION)),
        duration_recovered: duration.is_some(),
        entries,
    }
}

/// Scan for the plan-level duration field without parsing the document.
pub fn recover_duration(text: &str) -> Option<i64> {
    DURATION_PATTERN
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

fn entry_from_captures(position: usize, caps: &regex::Captures<'_>) -> Option<DayEntry> {
    let day: i64 = caps[1].parse().ok()?;
    let title = unescape(&caps[2])?;
    let description = match caps.get(3) {
        Some(m) => unescape(m.as_str())?,
        None => String::new(),
    };

    Some(DayEntry {
        day_index: positive_day(day).unwrap_or_else(|| default_day(position)),
        title: non_blank_or(title, || default_title(position)),
        description: non_blank_or(description, || DEFAULT_DESCRIPTION.to_string()),
        tips: default_tips(),
    })
}

/// Decode a JSON string body. `None` on an invalid escape sequence.
fn unescape(body: &str) -> Option<String> {
    serde_json::from_str(&format!("\"{body}\"")).ok()
}

fn non_blank_or(text: String, default: impl FnOnce() -> String) -> String {
    if text.trim().is_empty() { default() } else { text }
}
