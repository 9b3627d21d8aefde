use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;

use crate::config::Config;
use crate::llm_client::GenerationBackend;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; a recording mock in tests.
    pub backend: Arc<dyn GenerationBackend>,
    pub sessions: SessionStore,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(backend: Arc<dyn GenerationBackend>, request_timeout_secs: u64) -> Self {
        Self {
            backend,
            sessions: SessionStore::new(Duration::from_secs(3600)),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_api_base_url: "http://127.0.0.1:0".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                request_timeout_secs,
                session_ttl_secs: 3600,
            },
        }
    }
}
