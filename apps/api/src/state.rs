use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::session::SessionRegistry;
use crate::resume::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Resume persistence. Default: `PgResumeStore` over `db`.
    pub resume_store: Arc<dyn ResumeStore>,
    /// Open resume editing sessions, in memory only.
    pub sessions: SessionRegistry,
}
