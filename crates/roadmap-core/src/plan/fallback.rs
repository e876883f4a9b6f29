//! Deterministic generic roadmap used when nothing could be recovered.

use super::types::{DayEntry, Plan, clamp_duration};

const FALLBACK_TIPS: [&str; 3] = ["Stay consistent", "Don't give up", "Celebrate small wins"];

/// Goal text used in templates when the caller's goal is blank.
const UNNAMED_GOAL: &str = "your goal";

/// Build a generic plan with one entry per day.
///
/// `duration` is clamped into `[1, 90]`. The same inputs always produce the
/// same plan.
pub fn fallback_plan(goal: &str, duration: i64) -> Plan {
    let days = clamp_duration(duration);
    let goal = match goal.trim() {
        "" => UNNAMED_GOAL,
        trimmed => trimmed,
    };

    let entries = (1..=days)
        .map(|day| DayEntry {
            day_index: day,
            title: format!("Day {day}: Progress towards {goal}"),
            description: format!("Focus on completing one small step towards: {goal}"),
            tips: FALLBACK_TIPS.iter().map(|t| t.to_string()).collect(),
        })
        .collect();

    Plan::from_validated(days, entries)
}
