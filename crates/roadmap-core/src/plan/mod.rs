//! Roadmap derivation: sanitizing, parsing, recovery, validation, fallback.

pub mod error;
pub mod fallback;
pub mod parser;
pub mod pipeline;
pub mod recovery;
pub mod sanitize;
pub mod types;
pub mod validate;

pub use error::PlanError;
pub use fallback::fallback_plan;
pub use parser::parse_strict;
pub use pipeline::{Derivation, PlanSource, derive_plan, derive_plan_traced};
pub use recovery::{recover, recover_duration};
pub use sanitize::sanitize;
pub use types::{
    CandidatePlan, DEFAULT_DURATION, DayEntry, MAX_DURATION, MIN_DURATION, Plan, clamp_duration,
};
pub use validate::validate;
