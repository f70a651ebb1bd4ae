use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::cover_letter::{
    delete_cover_letter, generate_cover_letter, get_cover_letter, list_cover_letters,
    update_cover_letter,
};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::profile::find_user;
use crate::routes::UserIdQuery;
use crate::schema::cover_letter::{validate_cover_letter_request, CoverLetterRequest};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CoverLetterContent {
    pub content: String,
}

/// POST /api/v1/cover-letters
pub async fn handle_generate(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<(StatusCode, Json<CoverLetterRow>), AppError> {
    let request = validate_cover_letter_request(&req)?;
    let user = find_user(&state.db, params.user_id).await?;
    let letter = generate_cover_letter(&state.db, &state.llm, &user, &request).await?;
    Ok((StatusCode::CREATED, Json(letter)))
}

/// GET /api/v1/cover-letters
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    Ok(Json(list_cover_letters(&state.db, params.user_id).await?))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CoverLetterRow>, AppError> {
    Ok(Json(get_cover_letter(&state.db, params.user_id, id).await?))
}

/// PUT /api/v1/cover-letters/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    Json(req): Json<CoverLetterContent>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let letter = update_cover_letter(&state.db, params.user_id, id, &req.content).await?;
    Ok(Json(letter))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    delete_cover_letter(&state.db, params.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
