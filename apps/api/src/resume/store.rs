//! Persistence seam for the resume markdown.
//!
//! `AppState` carries an `Arc<dyn ResumeStore>`. The document is written whole on every
//! save; the last save wins.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn load(&self, user_id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    async fn save(&self, user_id: Uuid, content: &str) -> Result<ResumeRow, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn load(&self, user_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn save(&self, user_id: Uuid, content: &str) -> Result<ResumeRow, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (user_id, content)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                content = EXCLUDED.content,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for tests
// ────────────────────────────────────────────────────────────────────────────
