use std::sync::Arc;

use crate::llm_client::GenerativeBackend;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every tailoring request owns its own inputs and result.
#[derive(Clone)]
pub struct AppState {
    /// The generative backend. `LlmClient` in production, a stub in tests.
    pub backend: Arc<dyn GenerativeBackend>,
}
