//! Roadmap service layer.
//!
//! Glues prompt construction, the injected [`CompletionClient`] and the plan
//! pipeline together. The service never holds global state: every call goes
//! through the client it was built with, under the caller's timeout.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::completion::types::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::completion::{CompletionClient, CompletionError, CompletionRequest};
use crate::plan::{Derivation, derive_plan_traced};
use crate::prompt::{RoastContext, UserProfile, build_roadmap_prompt, build_roast_prompt};

/// Default timeout for a single completion call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Token budget for roast messages.
const ROAST_MAX_TOKENS: u32 = 150;

/// Generates roadmaps and roast messages through an injected client.
#[derive(Clone)]
pub struct RoadmapService {
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
}

impl std::fmt::Debug for RoadmapService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadmapService")
            .field("client", &self.client.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RoadmapService {
    /// Build a service over `client`, bounding every call by `timeout`.
    pub fn new(client: Arc<dyn CompletionClient>, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the token budget and temperature for roadmap requests.
    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Ask the model for a roadmap toward `goal` and derive a plan from its
    /// answer.
    ///
    /// Only transport failures are returned as errors. Any answer at all,
    /// however malformed, produces a plan (possibly the generic fallback).
    pub async fn generate_roadmap(
        &self,
        goal: &str,
        profile: Option<&UserProfile>,
        duration_hint: Option<i64>,
    ) -> Result<Derivation, CompletionError> {
        let request = CompletionRequest::new(build_roadmap_prompt(goal, profile))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let raw = self.complete(&request).await?;
        debug!(raw_len = raw.len(), client = self.client.name(), "raw roadmap response");

        let derivation = derive_plan_traced(&raw, goal, duration_hint);
        info!(
            source = %derivation.source,
            days = derivation.plan.entries().len(),
            "roadmap generated"
        );
        Ok(derivation)
    }

    /// Ask the model for a short roast about an unfinished task.
    ///
    /// Never fails: a transport error or a blank answer yields a plain
    /// reminder instead.
    pub async fn roast_message(&self, ctx: &RoastContext) -> String {
        let request =
            CompletionRequest::new(build_roast_prompt(ctx)).with_max_tokens(ROAST_MAX_TOKENS);

        match self.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                debug!("blank roast response, using reminder");
                default_roast(ctx)
            }
            Err(e) => {
                warn!(error = %e, "roast request failed, using reminder");
                default_roast(ctx)
            }
        }
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        match tokio::time::timeout(self.timeout, self.client.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout(self.timeout)),
        }
    }
}

/// Plain reminder used when no roast could be generated.
pub fn default_roast(ctx: &RoastContext) -> String {
    format!("Time to complete: {}", ctx.task_title.trim())
}
