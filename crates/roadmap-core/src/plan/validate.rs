//! Plan validation.
//!
//! Turns a [`CandidatePlan`] from either parser into a [`Plan`]:
//! - An empty entry list is rejected with [`PlanError::EmptyPlan`].
//! - The duration is clamped into `[1, 90]`, never rejected.
//! - Blank titles, blank descriptions and empty tip lists are replaced with
//!   their defaults.
//!
//! Day indices are left exactly as received. Duplicates and gaps are
//! tolerated because consumers key off entry order.

use super::error::PlanError;
use super::types::{
    CandidatePlan, DEFAULT_DESCRIPTION, DayEntry, Plan, clamp_duration, default_tips,
    default_title,
};

/// Validate a candidate plan.
pub fn validate(candidate: CandidatePlan) -> Result<Plan, PlanError> {
    if candidate.entries.is_empty() {
        return Err(PlanError::EmptyPlan);
    }

    let entries = candidate
        .entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| fill_blanks(i + 1, entry))
        .collect();

    Ok(Plan::from_validated(
        clamp_duration(candidate.estimated_duration),
        entries,
    ))
}

fn fill_blanks(position: usize, mut entry: DayEntry) -> DayEntry {
    if entry.title.trim().is_empty() {
        entry.title = default_title(position);
    }
    if entry.description.trim().is_empty() {
        entry.description = DEFAULT_DESCRIPTION.to_string();
    }
    entry.tips.retain(|tip| !tip.trim().is_empty());
    if entry.tips.is_empty() {
        entry.tips = default_tips();
    }
    entry
}
