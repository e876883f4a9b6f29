//! Offline client that answers every prompt with the contents of a file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::CompletionError;
use super::trait_def::CompletionClient;
use super::types::CompletionRequest;

/// [`CompletionClient`] that replays a saved raw response.
///
/// The file is read on every call, so it can be edited between runs.
#[derive(Debug, Clone)]
pub struct FixtureClient {
    path: PathBuf,
}

impl FixtureClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CompletionClient for FixtureClient {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CompletionError::Fixture {
                path: self.path.clone(),
                source,
            })
    }
}
