use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::profile::{find_user, require_industry};
use crate::resume::document::{ContactInfo, EntryDraft, EntryKind};
use crate::resume::improve_description;
use crate::resume::session::{
    apply_form_fields, save_session, ResumeSession, SessionHandle, SessionSnapshot,
};
use crate::resume::sync::Authority;
use crate::routes::UserIdQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ImproveRequest {
    pub description: String,
    pub kind: EntryKind,
}

#[derive(Serialize)]
pub struct ImproveResponse {
    pub improved: String,
}

/// Structured form fields; omitted fields are left as they are.
#[derive(Deserialize)]
pub struct FormPatch {
    pub contact_info: Option<ContactInfo>,
    pub summary: Option<String>,
    pub skills: Option<String>,
}

#[derive(Deserialize)]
pub struct MarkdownBody {
    pub markdown: String,
}

#[derive(Deserialize)]
pub struct ModeBody {
    pub authority: Authority,
}

/// `draft: null` (or an empty object) commits the session's stored draft.
#[derive(Deserialize)]
pub struct AddEntryBody {
    #[serde(default)]
    pub draft: Option<EntryDraft>,
}

fn parse_kind(raw: &str) -> Result<EntryKind, AppError> {
    raw.parse().map_err(AppError::NotFound)
}

async fn session_for(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> Result<SessionHandle, AppError> {
    state.sessions.get(id, user_id).await
}

async fn snapshot_of(handle: &SessionHandle) -> Json<SessionSnapshot> {
    Json(handle.lock().await.snapshot())
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted resume
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = state
        .resume_store
        .load(params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No resume for user {}", params.user_id)))?;
    Ok(Json(row))
}

/// POST /api/v1/resume/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".into()));
    }
    let user = find_user(&state.db, params.user_id).await?;
    let industry = require_industry(&user)?;
    let improved = improve_description(&state.llm, &req.description, req.kind, industry).await?;
    Ok(Json(ImproveResponse { improved }))
}

// ────────────────────────────────────────────────────────────────────────────
// Editing sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/sessions
pub async fn handle_open_session(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    let persisted = state.resume_store.load(user.id).await?.map(|row| row.content);
    let name = user.name.clone().unwrap_or_else(|| user.email.clone());

    let handle = state
        .sessions
        .insert(ResumeSession::open(user.id, name, persisted))
        .await;
    let snapshot = snapshot_of(&handle).await;
    info!(
        "Opened resume session {} for user {} ({:?} authoritative)",
        snapshot.id,
        user.id,
        snapshot.authority
    );
    Ok((StatusCode::CREATED, snapshot))
}

/// GET /api/v1/resume/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_for(&state, id, params.user_id).await?;
    Ok(snapshot_of(&handle).await)
}

/// DELETE /api/v1/resume/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id, params.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/resume/sessions/:id/form
pub async fn handle_patch_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    Json(patch): Json<FormPatch>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_for(&state, id, params.user_id).await?;
    let mut session = handle.lock().await;
    apply_form_fields(&mut session, patch.contact_info, patch.summary, patch.skills)?;
    Ok(Json(session.snapshot()))
}

/// PUT /api/v1/resume/sessions/:id/markdown
pub async fn handle_put_markdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    Json(body): Json<MarkdownBody>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_for(&state, id, params.user_id).await?;
    let mut session = handle.lock().await;
    session.edit_markdown(body.markdown)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/resume/sessions/:id/mode
pub async fn handle_set_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    Json(body): Json<ModeBody>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_for(&state, id, params.user_id).await?;
    let mut session = handle.lock().await;
    session.set_authority(body.authority);
    Ok(Json(session.snapshot()))
}

/// PUT /api/v1/resume/sessions/:id/entries/:kind/draft
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    Query(params): Query<UserIdQuery>,
    Json(draft): Json<EntryDraft>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let kind = parse_kind(&kind)?;
    let handle = session_for(&state, id, params.user_id).await?;
    let mut session = handle.lock().await;
    session.set_draft(kind, draft);
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/resume/sessions/:id/entries/:kind/draft/improve
///
/// The AI call runs with the session unlocked; the improved text replaces the draft
/// description when it settles.
pub async fn handle_improve_draft(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let kind = parse_kind(&kind)?;
    let handle = session_for(&state, id, params.user_id).await?;
    let user = find_user(&state.db, params.user_id).await?;
    let industry = require_industry(&user)?;

    let (description, action) = {
        let session = handle.lock().await;
        (session.draft_description(kind)?, session.improve_action())
    };
    let improved = action
        .run(improve_description(&state.llm, &description, kind, industry))
        .await?;

    let mut session = handle.lock().await;
    session.set_draft_description(kind, improved);
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/resume/sessions/:id/entries/:kind
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    Query(params): Query<UserIdQuery>,
    Json(body): Json<AddEntryBody>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let kind = parse_kind(&kind)?;
    let handle = session_for(&state, id, params.user_id).await?;
    let mut session = handle.lock().await;
    session.add_entry(kind, body.draft)?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/resume/sessions/:id/entries/:kind/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, kind, index)): Path<(Uuid, String, usize)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let kind = parse_kind(&kind)?;
    let handle = session_for(&state, id, params.user_id).await?;
    let mut session = handle.lock().await;
    session.remove_entry(kind, index)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/resume/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRow>, AppError> {
    let handle = session_for(&state, id, params.user_id).await?;
    let row = save_session(state.resume_store.as_ref(), &handle).await?;
    Ok(Json(row))
}
