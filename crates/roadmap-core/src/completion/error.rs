use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures of the generative-service call itself.
///
/// These are the only errors that reach callers of the service layer; they
/// are never mixed up with payload problems, which the plan pipeline absorbs.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("completion service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion response contained no choices")]
    EmptyResponse,

    #[error("failed to decode completion response: {0}")]
    Decode(String),

    #[error("failed to read fixture {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        source: std::io::Error,
    },
}
