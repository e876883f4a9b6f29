//! Turns untrusted generative-model output into validated multi-day roadmaps.
//!
//! - [`plan`]: the derivation pipeline (sanitize, parse, recover, validate,
//!   fall back). Pure and synchronous.
//! - [`prompt`]: prompt construction for roadmap and roast requests.
//! - [`completion`]: the injected "complete this prompt" collaborator.
//! - [`service`]: ties the three together behind a timeout.

pub mod completion;
pub mod plan;
pub mod prompt;
pub mod service;

pub use plan::{DayEntry, Derivation, Plan, PlanSource, derive_plan, derive_plan_traced};
pub use service::RoadmapService;
