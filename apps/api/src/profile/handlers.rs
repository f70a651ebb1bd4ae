use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::profile::{
    find_user, onboarding_status, sync_user, update_profile, OnboardingStatus, ProfileView,
    UserSync,
};
use crate::routes::UserIdQuery;
use crate::schema::profile::{validate_onboarding, validate_profile_update, ProfileInput};
use crate::state::AppState;

/// POST /api/v1/users
pub async fn handle_sync_user(
    State(state): State<AppState>,
    Json(identity): Json<UserSync>,
) -> Result<Json<ProfileView>, AppError> {
    let user = sync_user(&state.db, &identity).await?;
    Ok(Json(ProfileView::from(&user)))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileView>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    Ok(Json(ProfileView::from(&user)))
}

/// PUT /api/v1/profile
/// The first write (no industry yet) goes through the stricter onboarding rules.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<ProfileView>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    let update = if user.industry.is_none() {
        validate_onboarding(&input)?
    } else {
        validate_profile_update(&input)?
    };

    let user = update_profile(
        &state.db,
        &state.llm,
        state.config.insight_refresh_days,
        user.id,
        &update,
    )
    .await?;
    Ok(Json(ProfileView::from(&user)))
}

/// GET /api/v1/profile/onboarding-status
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<OnboardingStatus>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    Ok(Json(onboarding_status(&user)))
}
