//! Cover letter generation and storage.
//!
//! Letters are generated once from a validated request and the author's profile, then edited
//! as a whole markdown string. Every query is scoped to the owning user.

pub mod handlers;
pub mod prompts;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, CAREER_WRITER_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::cover_letter::CoverLetterRow;
use crate::models::user::UserRow;
use crate::schema::cover_letter::CoverLetterRequest;

pub const STATUS_COMPLETED: &str = "completed";

pub fn build_prompt(user: &UserRow, request: &CoverLetterRequest) -> String {
    let experience = user
        .experience
        .map(|years| years.to_string())
        .unwrap_or_else(|| "not specified".into());
    let skills = if user.skills.is_empty() {
        "not specified".to_string()
    } else {
        user.skills.join(", ")
    };

    fill(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("job_title", request.job_title.as_str()),
            ("company_name", request.company_name.as_str()),
            ("industry", user.industry.as_deref().unwrap_or("not specified")),
            ("experience", experience.as_str()),
            ("skills", skills.as_str()),
            ("bio", user.bio.as_deref().unwrap_or("not specified")),
            ("job_description", request.job_description.as_str()),
        ],
    )
}

pub async fn generate_cover_letter(
    pool: &PgPool,
    llm: &LlmClient,
    user: &UserRow,
    request: &CoverLetterRequest,
) -> Result<CoverLetterRow, AppError> {
    let content = llm
        .call_text(&build_prompt(user, request), CAREER_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate cover letter: {e}")))?;

    let letter = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters (user_id, content, company_name, job_title, job_description, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&content)
    .bind(&request.company_name)
    .bind(&request.job_title)
    .bind(&request.job_description)
    .bind(STATUS_COMPLETED)
    .fetch_one(pool)
    .await?;

    info!(
        "Generated cover letter {} for user {} ({} at {})",
        letter.id, user.id, request.job_title, request.company_name
    );
    Ok(letter)
}

/// Newest first.
pub async fn list_cover_letters(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CoverLetterRow>, AppError> {
    Ok(sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_cover_letter(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<CoverLetterRow, AppError> {
    sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

/// Replaces the whole letter body. Last save wins.
pub async fn update_cover_letter(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    content: &str,
) -> Result<CoverLetterRow, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("Cover letter content cannot be empty".into()));
    }

    sqlx::query_as::<_, CoverLetterRow>(
        r#"
        UPDATE cover_letters SET content = $3, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(content)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

pub async fn delete_cover_letter(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }
    info!("Deleted cover letter {id} for user {user_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            external_id: "idp|42".into(),
            email: "sam@example.com".into(),
            name: Some("Sam Lee".into()),
            industry: Some("tech-software-development".into()),
            experience: Some(6.0),
            bio: None,
            skills: vec!["Rust".into(), "Tokio".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request() -> CoverLetterRequest {
        CoverLetterRequest {
            company_name: "Ferrous Systems".into(),
            job_title: "Platform Engineer".into(),
            job_description: "Build the async runtime that powers our edge fleet.".into(),
        }
    }

    #[test]
    fn test_prompt_carries_request_and_profile() {
        let prompt = build_prompt(&user(), &request());
        assert!(prompt.contains("a Platform Engineer position at Ferrous Systems"));
        assert!(prompt.contains("- Industry: tech-software-development"));
        assert!(prompt.contains("- Skills: Rust, Tokio"));
        assert!(prompt.contains("Build the async runtime"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_prompt_fills_missing_profile_fields() {
        let mut user = user();
        user.skills.clear();
        user.experience = None;
        let prompt = build_prompt(&user, &request());
        assert!(prompt.contains("- Years of experience: not specified"));
        assert!(prompt.contains("- Skills: not specified"));
        assert!(prompt.contains("- Professional background: not specified"));
    }
}
