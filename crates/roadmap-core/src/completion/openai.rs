//! Client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! One request per call: no retries, no streaming. The service layer owns
//! the timeout.

use async_trait::async_trait;
use tracing::debug;

use super::error::CompletionError;
use super::trait_def::CompletionClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, CompletionRequest};

/// Longest error body kept in [`CompletionError::Http`].
const MAX_ERROR_BODY: usize = 500;

/// Connection settings for an OpenAI-compatible service.
#[derive(Clone)]
pub struct ApiSettings {
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    /// Sent as `X-Title` for services that attribute traffic by app.
    pub app_title: String,
    /// Sent as `HTTP-Referer`; omitted when empty.
    pub referer: String,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("app_title", &self.app_title)
            .field("referer", &self.referer)
            .finish()
    }
}

/// [`CompletionClient`] backed by an HTTP chat-completion API.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    settings: ApiSettings,
}

impl OpenAiCompatibleClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest::from_request(&self.settings.model, request);

        let mut builder = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .header("X-Title", &self.settings.app_title);
        if !self.settings.referer.is_empty() {
            builder = builder.header("HTTP-Referer", &self.settings.referer);
        }

        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_on_char_boundary(&mut body, MAX_ERROR_BODY);
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        if let Some(usage) = parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }
        if let Some(reason) = parsed.choices.first().and_then(|c| c.finish_reason.as_deref()) {
            debug!(finish_reason = reason, "completion finished");
        }

        parsed.into_content()
    }
}

fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
