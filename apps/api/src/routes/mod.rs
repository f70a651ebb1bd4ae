pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::{cover_letter, export, insights, interview, profile, resume};

/// Caller identity. Stands in for the external identity provider's session.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    use cover_letter::handlers as letters;
    use interview::handlers as interviews;
    use resume::handlers as resumes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Profile & onboarding
        .route("/api/v1/users", post(profile::handlers::handle_sync_user))
        .route(
            "/api/v1/profile",
            get(profile::handlers::handle_get_profile).put(profile::handlers::handle_update_profile),
        )
        .route(
            "/api/v1/profile/onboarding-status",
            get(profile::handlers::handle_onboarding_status),
        )
        // Dashboard
        .route(
            "/api/v1/dashboard/insights",
            get(insights::handlers::handle_dashboard_insights),
        )
        // Resume
        .route("/api/v1/resume", get(resumes::handle_get_resume))
        .route("/api/v1/resume/improve", post(resumes::handle_improve))
        .route("/api/v1/resume/sessions", post(resumes::handle_open_session))
        .route(
            "/api/v1/resume/sessions/:id",
            get(resumes::handle_get_session).delete(resumes::handle_close_session),
        )
        .route("/api/v1/resume/sessions/:id/form", patch(resumes::handle_patch_form))
        .route(
            "/api/v1/resume/sessions/:id/markdown",
            put(resumes::handle_put_markdown),
        )
        .route("/api/v1/resume/sessions/:id/mode", post(resumes::handle_set_mode))
        .route(
            "/api/v1/resume/sessions/:id/entries/:kind",
            post(resumes::handle_add_entry),
        )
        .route(
            "/api/v1/resume/sessions/:id/entries/:kind/draft",
            put(resumes::handle_put_draft),
        )
        .route(
            "/api/v1/resume/sessions/:id/entries/:kind/draft/improve",
            post(resumes::handle_improve_draft),
        )
        .route(
            "/api/v1/resume/sessions/:id/entries/:kind/:index",
            delete(resumes::handle_remove_entry),
        )
        .route("/api/v1/resume/sessions/:id/save", post(resumes::handle_save))
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            get(letters::handle_list).post(letters::handle_generate),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(letters::handle_get)
                .put(letters::handle_update)
                .delete(letters::handle_delete),
        )
        // Interview practice
        .route("/api/v1/interview/quiz", post(interviews::handle_generate_quiz))
        .route(
            "/api/v1/interview/assessments",
            get(interviews::handle_list_assessments).post(interviews::handle_submit_assessment),
        )
        .route("/api/v1/interview/stats", get(interviews::handle_stats))
        // PDF export
        .route("/api/v1/export/:document", get(export::handle_export_options))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::resume::session::SessionRegistry;
    use crate::resume::store::memory::MemoryResumeStore;
    use crate::resume::store::ResumeStore;

    fn test_state(store: Arc<dyn ResumeStore>) -> AppState {
        let config = Config {
            database_url: "postgres://localhost/unused".into(),
            database_max_connections: 1,
            anthropic_api_key: "test-key".into(),
            port: 0,
            rust_log: "info".into(),
            insight_refresh_days: 7,
            session_idle_timeout: std::time::Duration::from_secs(1800),
        };
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            llm: LlmClient::new(config.anthropic_api_key.clone()).unwrap(),
            config,
            resume_store: store,
            sessions: SessionRegistry::new(),
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_export_options_route() {
        let app = build_router(test_state(Arc::new(MemoryResumeStore::default())));
        let (status, body) = get(app.clone(), "/api/v1/export/cover-letter").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filename"], "cover-letter.pdf");

        let (status, body) = get(app, "/api/v1/export/invoice").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_resume_reads_store() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(MemoryResumeStore::with_content(user_id, "## Skills\n\nRust"));
        let app = build_router(test_state(store));

        let (status, body) = get(app.clone(), &format!("/api/v1/resume?user_id={user_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "## Skills\n\nRust");

        let other = Uuid::new_v4();
        let (status, _) = get(app, &format!("/api/v1/resume?user_id={other}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = build_router(test_state(Arc::new(MemoryResumeStore::default())));
        let uri = format!(
            "/api/v1/resume/sessions/{}?user_id={}",
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let (status, _) = get(app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_user_id_is_rejected() {
        let app = build_router(test_state(Arc::new(MemoryResumeStore::default())));
        let (status, _) = get(app, "/api/v1/resume").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
