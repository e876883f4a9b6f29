//! Completion collaborator: the "send a prompt, receive raw text" seam.
//!
//! This module defines the [`CompletionClient`] trait, its error type, the
//! chat-completion wire types, two concrete clients and the
//! [`ClientRegistry`] for runtime lookup.
//!
//! # Architecture
//!
//! ```text
//! RoadmapService
//!     |
//!     v
//! Arc<dyn CompletionClient> --complete(request)--> raw text
//!     |                                               |
//!     |  Err(CompletionError) -> caller               v
//!     |                                         derive_plan(raw, goal, hint)
//! ```

pub mod error;
pub mod fixture;
pub mod openai;
pub mod registry;
pub mod trait_def;
pub mod types;

pub use error::CompletionError;
pub use fixture::FixtureClient;
pub use openai::{ApiSettings, OpenAiCompatibleClient};
pub use registry::ClientRegistry;
pub use trait_def::CompletionClient;
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, CompletionRequest,
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, Usage,
};
