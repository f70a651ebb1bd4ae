pub mod handlers;
pub mod industry;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::generator::ensure_insight;
use crate::llm_client::LlmClient;
use crate::models::user::UserRow;
use crate::profile::industry::{split_industry, stored_industry};
use crate::schema::profile::ProfileUpdate;

/// Identity asserted by the external identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSync {
    pub external_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Profile as the settings form consumes it: the stored industry split back into its parts.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub sub_industry: Option<String>,
    pub experience: Option<f64>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
}

impl From<&UserRow> for ProfileView {
    fn from(user: &UserRow) -> Self {
        let (industry, sub_industry) = match user.industry.as_deref() {
            Some(stored) => {
                let (industry, sub) = split_industry(stored);
                (Some(industry), (!sub.is_empty()).then_some(sub))
            }
            None => (None, None),
        };
        ProfileView {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            industry,
            sub_industry,
            experience: user.experience,
            bio: user.bio.clone(),
            skills: user.skills.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

pub fn onboarding_status(user: &UserRow) -> OnboardingStatus {
    OnboardingStatus {
        is_onboarded: user.industry.is_some(),
    }
}

/// The user's industry, or a conflict telling the caller to finish onboarding first.
pub fn require_industry(user: &UserRow) -> Result<&str, AppError> {
    user.industry
        .as_deref()
        .ok_or_else(|| AppError::Conflict("Complete onboarding before using this feature".into()))
}

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

/// Creates the user on first sign-in, refreshes email and name afterwards.
pub async fn sync_user(pool: &PgPool, identity: &UserSync) -> Result<UserRow, AppError> {
    let external_id = identity.external_id.trim();
    let email = identity.email.trim();
    if external_id.is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "external_id and email are required".into(),
        ));
    }

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (external_id, email, name)
        VALUES ($1, $2, $3)
        ON CONFLICT (external_id) DO UPDATE SET
            email = EXCLUDED.email,
            name = COALESCE(EXCLUDED.name, users.name),
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(external_id)
    .bind(email)
    .bind(identity.name.as_deref().map(str::trim))
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Writes a validated profile. A new industry gets its insight row before the user row
/// points at it.
pub async fn update_profile(
    pool: &PgPool,
    llm: &LlmClient,
    refresh_days: i64,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> Result<UserRow, AppError> {
    let industry = stored_industry(update);
    if let Some(industry) = industry.as_deref() {
        ensure_insight(pool, llm, industry, refresh_days).await?;
    }

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users SET
            industry = COALESCE($2, industry),
            experience = COALESCE($3, experience),
            bio = COALESCE($4, bio),
            skills = COALESCE($5, skills),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(industry)
    .bind(update.experience)
    .bind(update.bio.as_deref())
    .bind(update.skills.as_deref())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    info!("Updated profile for user {user_id}");
    Ok(user)
}
