//! Interview practice: AI-generated quizzes, graded assessments and progress stats.

pub mod handlers;
pub mod prompts;
pub mod quiz;
pub mod stats;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::prompts::{IMPROVEMENT_TIP_PROMPT_TEMPLATE, QUIZ_PROMPT_TEMPLATE};
use crate::interview::quiz::{describe_wrong_answers, grade, Graded, Quiz, QuizQuestion};
use crate::llm_client::prompts::{fill, CAREER_WRITER_SYSTEM, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::assessment::AssessmentRow;
use crate::models::user::UserRow;

pub const TECHNICAL_CATEGORY: &str = "Technical";

pub fn build_quiz_prompt(industry: &str, skills: &[String]) -> String {
    let skills_clause = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };
    fill(
        QUIZ_PROMPT_TEMPLATE,
        &[("industry", industry), ("skills_clause", skills_clause.as_str())],
    )
}

pub async fn generate_quiz(llm: &LlmClient, industry: &str, skills: &[String]) -> Result<Quiz, AppError> {
    let quiz: Quiz = llm
        .call_json(&build_quiz_prompt(industry, skills), JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate quiz: {e}")))?;

    quiz.checked()
        .ok_or_else(|| AppError::Llm("Generated quiz had no well-formed questions".into()))
}

/// Asks for a short tip based on the wrong answers. Failures are logged and swallowed.
async fn improvement_tip(llm: &LlmClient, industry: &str, graded: &Graded) -> Option<String> {
    if graded.wrong().next().is_none() {
        return None;
    }
    let prompt = fill(
        IMPROVEMENT_TIP_PROMPT_TEMPLATE,
        &[
            ("industry", industry),
            ("wrong_answers", describe_wrong_answers(graded).as_str()),
        ],
    );
    match llm.call_text(&prompt, CAREER_WRITER_SYSTEM).await {
        Ok(tip) => Some(tip),
        Err(e) => {
            warn!("Improvement tip generation failed, saving assessment without it: {e}");
            None
        }
    }
}

pub async fn save_assessment(
    pool: &PgPool,
    llm: &LlmClient,
    user: &UserRow,
    industry: &str,
    questions: &[QuizQuestion],
    answers: &[Option<String>],
) -> Result<AssessmentRow, AppError> {
    if questions.is_empty() {
        return Err(AppError::Validation("An assessment needs at least one question".into()));
    }

    let graded = grade(questions, answers);
    let tip = improvement_tip(llm, industry, &graded).await;
    let results = serde_json::to_value(&graded.results).map_err(|e| AppError::Internal(e.into()))?;

    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments (user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(graded.score)
    .bind(results)
    .bind(TECHNICAL_CATEGORY)
    .bind(tip)
    .fetch_one(pool)
    .await?;

    info!("Saved assessment {} for user {} (score {:.1})", row.id, user.id, row.quiz_score);
    Ok(row)
}

/// Oldest first.
pub async fn list_assessments(pool: &PgPool, user_id: Uuid) -> Result<Vec<AssessmentRow>, AppError> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_mentions_skills_when_present() {
        let prompt = build_quiz_prompt("finance-banking", &["Excel".into(), "SQL".into()]);
        assert!(prompt.contains("for a finance-banking professional with expertise in Excel, SQL."));

        let prompt = build_quiz_prompt("finance-banking", &[]);
        assert!(prompt.contains("for a finance-banking professional."));
    }
}
