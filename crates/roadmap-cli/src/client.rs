//! Completion client selection for the networked commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, bail};

use roadmap_core::RoadmapService;
use roadmap_core::completion::{
    ClientRegistry, CompletionClient, FixtureClient, OpenAiCompatibleClient,
};

use crate::config::RoadmapConfig;

/// Provider name of the HTTP client.
pub const HTTP_PROVIDER: &str = "openai-compatible";

/// Provider name of the file-backed client.
pub const FIXTURE_PROVIDER: &str = "fixture";

/// Register every client the current configuration allows.
///
/// The HTTP client needs an API key; the fixture client needs a file.
pub fn build_registry(config: &RoadmapConfig, fixture: Option<&Path>) -> ClientRegistry {
    let mut registry = ClientRegistry::new();
    if let Some(settings) = config.api_settings() {
        registry.register(OpenAiCompatibleClient::new(settings));
    }
    if let Some(path) = fixture {
        registry.register(FixtureClient::new(path));
    }
    registry
}

/// Pick the client named `provider`, defaulting to the fixture client when a
/// fixture file was given and to the HTTP client otherwise.
pub fn select_client(
    registry: &ClientRegistry,
    provider: Option<&str>,
    fixture: Option<&Path>,
) -> Result<Arc<dyn CompletionClient>> {
    let name = provider.unwrap_or(if fixture.is_some() {
        FIXTURE_PROVIDER
    } else {
        HTTP_PROVIDER
    });

    if let Some(client) = registry.get(name) {
        return Ok(client);
    }

    match name {
        HTTP_PROVIDER => bail!(
            "API key not found; set ROADMAP_API_KEY, pass --api-key, or run `roadmap init --api-key <KEY>`"
        ),
        FIXTURE_PROVIDER => bail!("provider `fixture` needs --fixture <FILE>"),
        other => {
            let available = registry.list();
            if available.is_empty() {
                bail!("unknown provider `{other}`; no providers are configured");
            }
            bail!(
                "unknown provider `{other}`; available: {}",
                available.join(", ")
            )
        }
    }
}

/// Build the service over `client` with the resolved timeout and sampling.
pub fn build_service(config: &RoadmapConfig, client: Arc<dyn CompletionClient>) -> RoadmapService {
    tracing::debug!(
        client = client.name(),
        timeout_secs = config.timeout.as_secs(),
        "completion client selected"
    );
    RoadmapService::new(client, config.timeout).with_sampling(config.max_tokens, config.temperature)
}
