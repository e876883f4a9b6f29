//! Strict JSON parser for roadmap payloads.
//!
//! Parses a sanitized payload as a full JSON document and maps it onto a
//! [`CandidatePlan`]. Defaulting happens per field: a wrong or missing field
//! never discards the rest of an otherwise usable document.
//!
//! Accepted document shape (aliases in parentheses):
//!
//! ```text
//! {
//!   "estimatedDays": 30,           (estimated_days, estimated_duration, estimatedDuration)
//!   "days": [                      (entries)
//!     {
//!       "day": 1,                  (day_index, dayIndex)
//!       "title": "...",
//!       "description": "...",
//!       "tips": ["...", "..."]
//!     }
//!   ]
//! }
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use super::error::PlanError;
use super::types::{
    CandidatePlan, DEFAULT_DESCRIPTION, DEFAULT_DURATION, DayEntry, default_tips, default_title,
};

pub(crate) const DURATION_KEYS: &[&str] = &[
    "estimatedDays",
    "estimated_days",
    "estimated_duration",
    "estimatedDuration",
];
pub(crate) const ENTRY_LIST_KEYS: &[&str] = &["days", "entries"];
pub(crate) const DAY_INDEX_KEYS: &[&str] = &["day", "day_index", "dayIndex"];

/// Parse a payload into a candidate plan.
///
/// Fails with [`PlanError::MalformedPayload`] only when the text is not a
/// JSON object at all. A document without a usable entry list yields a
/// candidate with zero entries, which the validator rejects.
pub fn parse_strict(payload: &str) -> Result<CandidatePlan, PlanError> {
    let document: Value =
        serde_json::from_str(payload).map_err(|e| PlanError::MalformedPayload(e.to_string()))?;

    let Value::Object(root) = document else {
        return Err(PlanError::MalformedPayload(
            "top-level value is not an object".to_string(),
        ));
    };

    let duration = lookup(&root, DURATION_KEYS).and_then(as_integer);

    let entries = match lookup(&root, ENTRY_LIST_KEYS).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let entry = parse_entry(i + 1, item);
                if entry.is_none() {
                    debug!(position = i + 1, "skipping non-object roadmap entry");
                }
                entry
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(CandidatePlan {
        estimated_duration: duration.unwrap_or(i64::from(DEFAULT_DURATION)),
        duration_recovered: duration.is_some(),
        entries,
    })
}

/// Map one array element onto a [`DayEntry`], or `None` if it is not an object.
///
/// `position` is the 1-based index of the element in the source array and
/// seeds the defaults for `day_index` and `title`.
fn parse_entry(position: usize, item: &Value) -> Option<DayEntry> {
    let fields = item.as_object()?;

    let day_index = lookup(fields, DAY_INDEX_KEYS)
        .and_then(as_integer)
        .and_then(positive_day)
        .unwrap_or_else(|| default_day(position));

    let title = fields
        .get("title")
        .and_then(as_text)
        .unwrap_or_else(|| default_title(position));

    let description = fields
        .get("description")
        .and_then(as_text)
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let tips = fields
        .get("tips")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(as_text).collect::<Vec<_>>())
        .filter(|tips| !tips.is_empty())
        .unwrap_or_else(default_tips);

    Some(DayEntry {
        day_index,
        title,
        description,
        tips,
    })
}

/// First value present under any of `keys`, in key order.
fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(*key))
}

/// Read an integer from a number or a numeric string.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a non-blank display string. Scalars are stringified.
fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Day numbers must be positive; anything else is treated as missing.
pub(crate) fn positive_day(day: i64) -> Option<u32> {
    u32::try_from(day).ok().filter(|&d| d > 0)
}

/// Default day number for the entry at 1-based `position`.
pub(crate) fn default_day(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::types::{DEFAULT_DESCRIPTION, DEFAULT_TIP};

    #[test]
    fn parses_complete_document() {
        let payload = r#"{
            "estimatedDays": 2,
            "days": [
                {"day": 1, "title": "Buy a guitar", "description": "Go to a store", "tips": ["Try before buying"]},
                {"day": 2, "title": "Tune it", "description": "Use a tuner app", "tips": ["Standard tuning", "Check twice"]}
            ]
        }"#;
        let plan = parse_strict(payload).expect("complete document should parse");
        assert_eq!(plan.estimated_duration, 2);
        assert!(plan.duration_recovered);
        assert_eq!(plan.entries.len(), 2);
        assert_eq!(
            plan.entries[0],
            DayEntry::new(
                1,
                "Buy a guitar",
                "Go to a store",
                vec!["Try before buying".to_string()]
            )
        );
        assert_eq!(plan.entries[1].tips, vec!["Standard tuning", "Check twice"]);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let payload = r#"{"days": [{}, {"title": "Second"}]}"#;
        let plan = parse_strict(payload).unwrap();

        assert_eq!(plan.estimated_duration, 30);
        assert!(!plan.duration_recovered);

        let first = &plan.entries[0];
        assert_eq!(first.day_index, 1);
        assert_eq!(first.title, "Task 1");
        assert_eq!(first.description, DEFAULT_DESCRIPTION);
        assert_eq!(first.tips, vec![DEFAULT_TIP]);

        let second = &plan.entries[1];
        assert_eq!(second.day_index, 2);
        assert_eq!(second.title, "Second");
    }

    #[test]
    fn non_object_entries_are_skipped_but_keep_positions() {
        let payload = r#"{"days": ["oops", 42, {"description": "Third slot"}]}"#;
        let plan = parse_strict(payload).unwrap();
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].day_index, 3);
        assert_eq!(plan.entries[0].title, "Task 3");
        assert_eq!(plan.entries[0].description, "Third slot");
    }

    #[test]
    fn wrong_typed_fields_fall_back_individually() {
        let payload = r#"{
            "estimatedDays": "soon",
            "days": [
                {"day": "first", "title": ["x"], "description": "", "tips": "be brave"},
                {"day": -3, "title": "   ", "tips": [{"nested": true}, ""]}
            ]
        }"#;
        let plan = parse_strict(payload).unwrap();
        assert!(!plan.duration_recovered);
        assert_eq!(plan.estimated_duration, 30);

        assert_eq!(plan.entries[0].day_index, 1);
        assert_eq!(plan.entries[0].title, "Task 1");
        assert_eq!(plan.entries[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(plan.entries[0].tips, vec![DEFAULT_TIP]);

        assert_eq!(plan.entries[1].day_index, 2);
        assert_eq!(plan.entries[1].title, "Task 2");
        assert_eq!(plan.entries[1].tips, vec![DEFAULT_TIP]);
    }

    #[test]
    fn numeric_strings_and_scalars_are_coerced() {
        let payload = r#"{
            "estimated_days": "14",
            "entries": [{"day_index": "4", "title": 101, "description": true, "tips": [7, "Rest"]}]
        }"#;
        let plan = parse_strict(payload).unwrap();
        assert_eq!(plan.estimated_duration, 14);
        let entry = &plan.entries[0];
        assert_eq!(entry.day_index, 4);
        assert_eq!(entry.title, "101");
        assert_eq!(entry.description, "true");
        assert_eq!(entry.tips, vec!["7", "Rest"]);
    }

    #[test]
    fn fractional_duration_truncates() {
        let plan = parse_strict(r#"{"estimatedDays": 12.7, "days": []}"#).unwrap();
        assert_eq!(plan.estimated_duration, 12);
    }

    #[test]
    fn out_of_range_duration_is_kept_raw() {
        let plan = parse_strict(r#"{"estimatedDays": 500, "days": []}"#).unwrap();
        assert_eq!(plan.estimated_duration, 500);
    }

    #[test]
    fn duplicate_and_unordered_days_are_preserved() {
        let payload = r#"{"days": [{"day": 3}, {"day": 1}, {"day": 1}]}"#;
        let plan = parse_strict(payload).unwrap();
        let days: Vec<u32> = plan.entries.iter().map(|e| e.day_index).collect();
        assert_eq!(days, vec![3, 1, 1]);
    }

    #[test]
    fn missing_entry_list_yields_empty_candidate() {
        let plan = parse_strict(r#"{"estimatedDays": 10}"#).unwrap();
        assert!(plan.entries.is_empty());
        assert_eq!(plan.recovered_duration(), Some(10));

        let plan = parse_strict(r#"{"days": {"day": 1}}"#).unwrap();
        assert!(plan.entries.is_empty());
    }

    #[test]
    fn truncated_document_is_malformed() {
        let err = parse_strict(r#"{"estimatedDays":2,"days":[{"day":1,"title":"A"}"#).unwrap_err();
        assert!(
            matches!(err, PlanError::MalformedPayload(_)),
            "expected MalformedPayload, got: {err}"
        );
    }

    #[test]
    fn non_object_document_is_malformed() {
        let err = parse_strict("[1, 2, 3]").unwrap_err();
        assert!(
            matches!(err, PlanError::MalformedPayload(_)),
            "expected MalformedPayload, got: {err}"
        );
    }
}
