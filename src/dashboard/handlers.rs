use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    dashboard::{dto::DashboardSummary, services::load_dashboard},
    dates,
    error::AppResult,
    state::AppState,
};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
) -> AppResult<Json<DashboardSummary>> {
    let profile = state.current_profile(profile_id).await?;
    let summary = load_dashboard(
        &state.weights,
        &state.recommendations,
        &profile,
        dates::today(),
    )
    .await?;
    Ok(Json(summary))
}
