use std::sync::Arc;

use crate::auth::github::OAuthProvider;
use crate::config::Config;
use crate::jobs::client::JobSearchProvider;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Nothing here is mutated after startup; upstream providers sit behind traits
/// so handlers can be exercised against stubs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jobs: Arc<dyn JobSearchProvider>,
    pub llm: Arc<dyn TextGenerator>,
    pub oauth: Arc<dyn OAuthProvider>,
}
