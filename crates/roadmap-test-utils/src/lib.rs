//! Shared test utilities for roadmap integration tests.
//!
//! Two pieces:
//! - [`fixtures`]: builders for raw model responses in the shapes seen in
//!   the wild (complete, fenced, truncated, garbage).
//! - [`ScriptedClient`]: a [`CompletionClient`] that replays a queue of
//!   scripted replies and records every request it receives.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use roadmap_core::completion::{CompletionClient, CompletionError, CompletionRequest};

pub mod fixtures;

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Return this text.
    Text(String),
    /// Fail as if the service answered with this HTTP status.
    Status(u16),
    /// Never answer within any reasonable timeout.
    Hang,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A [`CompletionClient`] that answers from a script.
///
/// Replies are consumed in order; once the script runs out every call fails
/// with [`CompletionError::EmptyResponse`].
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client that answers once with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new([Reply::text(text)])
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Status(status)) => Err(CompletionError::Http {
                status,
                body: "scripted failure".to_string(),
            }),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(CompletionError::EmptyResponse)
            }
            None => Err(CompletionError::EmptyResponse),
        }
    }
}
