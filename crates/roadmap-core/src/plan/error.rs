use thiserror::Error;

/// Ways a pipeline stage can fail to produce a usable plan.
///
/// None of these cross the pipeline boundary; each one routes to the next
/// recovery stage and is recorded on the [`super::Derivation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no bracketed payload found in response")]
    NoPayloadFound,

    #[error("payload is not a parseable document: {0}")]
    MalformedPayload(String),

    #[error("plan contains no usable entries")]
    EmptyPlan,
}
