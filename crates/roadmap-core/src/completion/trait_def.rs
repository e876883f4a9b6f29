//! The `CompletionClient` trait -- the seam to the generative service.
//!
//! Each concrete client (an HTTP chat-completion API, a local fixture file,
//! a scripted test double) implements this trait. The trait is object-safe
//! so clients can be injected as `Arc<dyn CompletionClient>` and stored in
//! the [`super::ClientRegistry`].

use async_trait::async_trait;

use super::error::CompletionError;
use super::types::CompletionRequest;

/// "Complete this prompt": send a prompt, receive raw text.
///
/// Implementations report transport failures as [`CompletionError`] and
/// never try to interpret the returned text; that is the plan pipeline's job.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Human-readable name for this client (e.g. "openai-compatible").
    fn name(&self) -> &str;

    /// Send `request` and return the raw completion text.
    ///
    /// Implementations should not retry or time out on their own; the
    /// service layer wraps every call in the caller's timeout.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

// Compile-time assertion: CompletionClient must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn CompletionClient) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes the prompt back, used only to prove the trait can be
    /// implemented and used as `dyn CompletionClient`.
    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            Ok(request.prompt.clone())
        }
    }

    #[test]
    fn client_is_object_safe() {
        let client: Box<dyn CompletionClient> = Box::new(EchoClient);
        assert_eq!(client.name(), "echo");
    }

    #[tokio::test]
    async fn echo_client_completes() {
        let client: Box<dyn CompletionClient> = Box::new(EchoClient);
        let text = client
            .complete(&CompletionRequest::new("ping"))
            .await
            .unwrap();
        assert_eq!(text, "ping");
    }
}
