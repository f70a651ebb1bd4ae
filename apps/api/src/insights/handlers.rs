use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::errors::AppError;
use crate::insights::generator::ensure_insight;
use crate::insights::view::{build_dashboard, DashboardView};
use crate::profile::{find_user, require_industry};
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/dashboard/insights
pub async fn handle_dashboard_insights(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    let industry = require_industry(&user)?;

    let row = ensure_insight(
        &state.db,
        &state.llm,
        industry,
        state.config.insight_refresh_days,
    )
    .await?;

    let view = build_dashboard(&row, Utc::now())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored salary ranges are malformed: {e}")))?;
    Ok(Json(view))
}
