//! Data model for derived roadmaps.
//!
//! A [`Plan`] can only be built by the validator or the fallback generator,
//! so every `Plan` a caller sees already satisfies the invariants: non-empty
//! entries, a duration in `[MIN_DURATION, MAX_DURATION]`, non-blank text
//! fields and at least one tip per day.

use serde::Serialize;

/// Shortest plan the pipeline will return, in days.
pub const MIN_DURATION: u32 = 1;

/// Longest plan the pipeline will return, in days.
pub const MAX_DURATION: u32 = 90;

/// Duration used when neither the document nor the caller supplies one.
pub const DEFAULT_DURATION: u32 = 30;

/// Placeholder description for a day the generator left blank.
pub const DEFAULT_DESCRIPTION: &str = "Complete this step";

/// Placeholder tip for a day with no usable tips.
pub const DEFAULT_TIP: &str = "Keep going";

/// Placeholder title for the day at 1-based `position`.
pub fn default_title(position: usize) -> String {
    format!("Task {position}")
}

/// Tip list used when a day has no usable tips.
pub fn default_tips() -> Vec<String> {
    vec![DEFAULT_TIP.to_string()]
}

/// Clamp an arbitrary duration into `[MIN_DURATION, MAX_DURATION]`.
pub fn clamp_duration(days: i64) -> u32 {
    // The clamp bounds fit in u32, so the cast cannot truncate.
    days.clamp(i64::from(MIN_DURATION), i64::from(MAX_DURATION)) as u32
}

/// One day's actionable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    /// Day number as reported by the generator. Not guaranteed unique or
    /// contiguous; consumers should key off entry order.
    pub day_index: u32,
    pub title: String,
    pub description: String,
    pub tips: Vec<String>,
}

impl DayEntry {
    /// Build an entry whose text fields are known to be filled in.
    pub fn new(
        day_index: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        tips: Vec<String>,
    ) -> Self {
        Self {
            day_index,
            title: title.into(),
            description: description.into(),
            tips,
        }
    }
}

/// A plan produced by one of the parsers, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidatePlan {
    /// Raw duration as found in the document, before clamping.
    pub estimated_duration: i64,
    /// Whether `estimated_duration` was actually present in the source text
    /// rather than defaulted.
    pub duration_recovered: bool,
    pub entries: Vec<DayEntry>,
}

impl CandidatePlan {
    /// The source-supplied duration, if the text contained one.
    pub fn recovered_duration(&self) -> Option<i64> {
        self.duration_recovered.then_some(self.estimated_duration)
    }
}

/// The validated multi-day roadmap returned by the pipeline.
///
/// Immutable once built; fields are exposed through accessors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    estimated_duration: u32,
    entries: Vec<DayEntry>,
}

impl Plan {
    /// Callers outside the `plan` module go through the validator or the
    /// fallback generator.
    pub(crate) fn from_validated(estimated_duration: u32, entries: Vec<DayEntry>) -> Self {
        debug_assert!(!entries.is_empty());
        debug_assert!((MIN_DURATION..=MAX_DURATION).contains(&estimated_duration));
        Self {
            estimated_duration,
            entries,
        }
    }

    /// Number of days the plan is expected to span, in `[1, 90]`.
    pub fn estimated_duration(&self) -> u32 {
        self.estimated_duration
    }

    /// Day entries in day order. Never empty.
    pub fn entries(&self) -> &[DayEntry] {
        &self.entries
    }

    /// Consume the plan, yielding its entries.
    pub fn into_entries(self) -> Vec<DayEntry> {
        self.entries
    }
}
