//! Roadmap derivation pipeline.
//!
//! Runs the stages in a fixed order and threads typed results between
//! them:
//!
//! ```text
//! raw text --sanitize--> payload --parse_strict--> candidate --validate--> Plan (Strict)
//!     |                     |              |                      |
//!     | NoPayloadFound      | Malformed    +------ EmptyPlan -----+
//!     |                     v              v
//!     |                 recover(payload) --validate--> Plan (Recovered)
//!     |                                        |
//!     |                                        | EmptyPlan
//!     v                                        v
//!  fallback_plan(goal, duration) ---------> Plan (Fallback)
//! ```
//!
//! [`derive_plan`] is total: once a goal string is available it always
//! returns a [`Plan`]. Every stage failure is recorded on the
//! [`Derivation`] instead of being swallowed.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::PlanError;
use super::fallback::fallback_plan;
use super::parser::parse_strict;
use super::recovery::recover;
use super::sanitize::sanitize;
use super::types::{DEFAULT_DURATION, Plan};
use super::validate::validate;

/// Which stage produced the returned plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    /// The payload parsed as a complete document.
    Strict,
    /// Entries were pattern-matched out of a malformed payload.
    Recovered,
    /// Nothing usable was found; the plan is the generic fallback.
    Fallback,
}

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Strict => "strict",
            Self::Recovered => "recovered",
            Self::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// A derived plan plus the path taken to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub plan: Plan,
    pub source: PlanSource,
    /// Stage failures encountered before `plan` was produced, in order.
    pub degradations: Vec<PlanError>,
}

impl Derivation {
    /// Whether the plan came from the generic fallback.
    pub fn is_fallback(&self) -> bool {
        self.source == PlanSource::Fallback
    }
}

/// Derive a plan from raw completion text.
///
/// `duration_hint` is the caller's preferred length; it sizes the fallback
/// plan when one is needed. Without a hint, the duration found in the text
/// is used, then [`DEFAULT_DURATION`].
pub fn derive_plan(raw_text: &str, goal: &str, duration_hint: Option<i64>) -> Plan {
    derive_plan_traced(raw_text, goal, duration_hint).plan
}

/// Like [`derive_plan`], but also reports which stage succeeded and which
/// stages failed on the way.
pub fn derive_plan_traced(raw_text: &str, goal: &str, duration_hint: Option<i64>) -> Derivation {
    let mut degradations = Vec::new();

    let payload = match sanitize(raw_text) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, raw_len = raw_text.len(), "no payload in response");
            degradations.push(e);
            return fall_back(goal, duration_hint, None, degradations);
        }
    };
    debug!(payload_len = payload.len(), "payload isolated");

    let mut recovered_duration = None;

    match parse_strict(payload) {
        Ok(candidate) => {
            recovered_duration = candidate.recovered_duration();
            match validate(candidate) {
                Ok(plan) => return finish(plan, PlanSource::Strict, degradations),
                Err(e) => {
                    warn!(error = %e, "strictly parsed document has no entries");
                    degradations.push(e);
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "strict parse failed, attempting partial recovery");
            degradations.push(e);
        }
    }

    let candidate = recover(payload);
    recovered_duration = recovered_duration.or(candidate.recovered_duration());
    match validate(candidate) {
        Ok(plan) => return finish(plan, PlanSource::Recovered, degradations),
        Err(e) => {
            warn!(error = %e, "partial recovery found no entries");
            degradations.push(e);
        }
    }

    fall_back(goal, duration_hint, recovered_duration, degradations)
}

fn fall_back(
    goal: &str,
    duration_hint: Option<i64>,
    recovered_duration: Option<i64>,
    degradations: Vec<PlanError>,
) -> Derivation {
    let duration = duration_hint
        .or(recovered_duration)
        .unwrap_or(i64::from(DEFAULT_DURATION));
    warn!(duration, "using fallback roadmap");
    finish(fallback_plan(goal, duration), PlanSource::Fallback, degradations)
}

fn finish(plan: Plan, source: PlanSource, degradations: Vec<PlanError>) -> Derivation {
    info!(
        %source,
        entries = plan.entries().len(),
        estimated_duration = plan.estimated_duration(),
        "roadmap derived"
    );
    Derivation {
        plan,
        source,
        degradations,
    }
}
