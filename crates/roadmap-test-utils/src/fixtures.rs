//! Raw model responses for tests.
//!
//! Documents are assembled by hand rather than through `serde_json::json!`
//! so keys keep the order models actually emit (`day`, `title`,
//! `description`, `tips`).

/// The truncated, fenced example response for the goal "Learn guitar".
pub const GUITAR_TRUNCATED: &str = "Sure! ```json\n{\"estimatedDays\":2,\"days\":[{\"day\":1,\"title\":\"Buy a guitar\",\"description\":\"Go to a store\",\"tips\":[\"Try before buying\"]}";

/// Responses with no recoverable structure at all.
pub const GARBAGE: &[&str] = &[
    "",
    "   \n\t ",
    "I'm sorry, but I can't help with that request.",
    "} backwards {",
    "{ not json, not entries either }",
    "```json\n```",
];

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// One serialized day entry with every field present.
pub fn day_entry(day: u32, title: &str, description: &str, tips: &[&str]) -> String {
    let tips: Vec<String> = tips.iter().map(|t| quote(t)).collect();
    format!(
        "{{\"day\":{day},\"title\":{},\"description\":{},\"tips\":[{}]}}",
        quote(title),
        quote(description),
        tips.join(",")
    )
}

/// Title used by [`sample_day`] for day `day`.
pub fn sample_title(day: u32) -> String {
    format!("Step {day}")
}

/// Description used by [`sample_day`] for day `day`.
pub fn sample_description(day: u32) -> String {
    format!("Work through step {day} for an hour")
}

/// Tips used by [`sample_day`] for day `day`.
pub fn sample_tips(day: u32) -> Vec<String> {
    vec![format!("Tip {day}a"), format!("Tip {day}b")]
}

/// A fully populated entry for day `day`.
pub fn sample_day(day: u32) -> String {
    let tips = sample_tips(day);
    let tips: Vec<&str> = tips.iter().map(String::as_str).collect();
    day_entry(day, &sample_title(day), &sample_description(day), &tips)
}

/// A well-formed document with `days` sample entries.
pub fn complete_document(estimated_days: i64, days: u32) -> String {
    let entries: Vec<String> = (1..=days).map(sample_day).collect();
    document(estimated_days, &entries)
}

/// A well-formed document around already-serialized entries.
pub fn document(estimated_days: i64, entries: &[String]) -> String {
    format!(
        "{{\"estimatedDays\":{estimated_days},\"days\":[{}]}}",
        entries.join(",")
    )
}

/// A document cut off partway through entry `complete + 1`, after
/// `complete` intact entries. The title of the partial entry is unfinished,
/// so no part of it is recoverable.
pub fn truncated_document(estimated_days: i64, complete: u32) -> String {
    let entries: Vec<String> = (1..=complete).map(sample_day).collect();
    let next = complete + 1;
    let mut text = format!("{{\"estimatedDays\":{estimated_days},\"days\":[");
    text.push_str(&entries.join(","));
    if complete > 0 {
        text.push(',');
    }
    text.push_str(&format!("{{\"day\":{next},\"title\":\"Ste"));
    text
}

/// Wrap `payload` the way chatty models do: prose, a `json` fence, more
/// prose.
pub fn fenced(payload: &str) -> String {
    format!("Sure! Here is your roadmap:\n\n```json\n{payload}\n```\n\nGood luck with your goal!")
}
