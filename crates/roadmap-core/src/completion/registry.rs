//! Client registry -- a named collection of available completion clients.
//!
//! Lets the CLI pick a client by name at runtime (e.g. `--provider fixture`).

use std::collections::HashMap;
use std::sync::Arc;

use super::trait_def::CompletionClient;

/// A collection of registered [`CompletionClient`] implementations, keyed by
/// name.
///
/// # Example
///
/// ```ignore
/// let mut registry = ClientRegistry::new();
/// registry.register(FixtureClient::new("response.txt"));
/// let client = registry.get("fixture").unwrap();
/// ```
#[derive(Default)]
pub struct ClientRegistry {
    clients: HashMap<String, Arc<dyn CompletionClient>>,
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client under the name returned by
    /// [`CompletionClient::name`], returning any client it replaced.
    pub fn register(
        &mut self,
        client: impl CompletionClient + 'static,
    ) -> Option<Arc<dyn CompletionClient>> {
        let name = client.name().to_string();
        self.clients.insert(name, Arc::new(client))
    }

    /// Look up a client by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CompletionClient>> {
        self.clients.get(name).cloned()
    }

    /// Names of all registered clients, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clients.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("clients", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionError, CompletionRequest};
    use async_trait::async_trait;

    /// Minimal test client.
    struct FakeClient {
        client_name: String,
    }

    impl FakeClient {
        fn new(name: &str) -> Self {
            Self {
                client_name: name.to_string(),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        fn name(&self) -> &str {
            &self.client_name
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            Ok(String::new())
        }
    }

    #[test]
    fn registry_starts_empty() {
        let registry = ClientRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.list().is_empty());
    }

    #[test]
    fn register_and_get() {
        let mut registry = ClientRegistry::new();
        assert!(registry.register(FakeClient::new("alpha")).is_none());

        let client = registry.get("alpha").expect("alpha should be registered");
        assert_eq!(client.name(), "alpha");
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = ClientRegistry::new();
        registry.register(FakeClient::new("alpha"));
        let old = registry.register(FakeClient::new("alpha"));
        assert_eq!(old.map(|c| c.name().to_string()).as_deref(), Some("alpha"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let registry = ClientRegistry::new();
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn list_is_sorted() {
        let mut registry = ClientRegistry::new();
        registry.register(FakeClient::new("gamma"));
        registry.register(FakeClient::new("alpha"));
        registry.register(FakeClient::new("beta"));
        assert_eq!(registry.list(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn registry_debug_shows_names() {
        let mut registry = ClientRegistry::new();
        registry.register(FakeClient::new("fixture"));
        assert!(format!("{registry:?}").contains("fixture"));
    }
}
