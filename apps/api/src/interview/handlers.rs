use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::quiz::{Quiz, QuizQuestion};
use crate::interview::stats::{compute_stats, InterviewStats};
use crate::interview::{generate_quiz, list_assessments, save_assessment};
use crate::models::assessment::AssessmentRow;
use crate::profile::{find_user, require_industry};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitAnswers {
    pub questions: Vec<QuizQuestion>,
    /// Positional; `null` for a skipped question.
    pub answers: Vec<Option<String>>,
}

/// POST /api/v1/interview/quiz
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Quiz>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    let industry = require_industry(&user)?;
    Ok(Json(generate_quiz(&state.llm, industry, &user.skills).await?))
}

/// POST /api/v1/interview/assessments
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(req): Json<SubmitAnswers>,
) -> Result<(StatusCode, Json<AssessmentRow>), AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    let industry = require_industry(&user)?;
    let row = save_assessment(&state.db, &state.llm, &user, industry, &req.questions, &req.answers)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/interview/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    Ok(Json(list_assessments(&state.db, params.user_id).await?))
}

/// GET /api/v1/interview/stats
pub async fn handle_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<InterviewStats>, AppError> {
    let assessments = list_assessments(&state.db, params.user_id).await?;
    Ok(Json(compute_stats(&assessments)))
}
