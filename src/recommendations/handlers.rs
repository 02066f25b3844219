use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::AuthUser,
    dates,
    error::{AppError, AppResult},
    recommendations::{
        dto::{GeneratedResponse, RecommendationsResponse},
        repo_types::DailyPlan,
    },
    state::AppState,
};

pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recommendations",
            get(get_recommendations).post(generate_recommendations),
        )
        .route("/plans/:date", get(get_plan))
}

#[instrument(skip(state))]
pub async fn get_recommendations(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
) -> AppResult<Json<RecommendationsResponse>> {
    let profile = state.current_profile(profile_id).await?;
    let recs = state.recommendations.recommendations(&profile).await?;
    Ok(Json(RecommendationsResponse {
        meals: recs.meals,
        exercises: recs.exercises,
    }))
}

/// Refreshes the catalog and appends a plan for today.
#[instrument(skip(state))]
pub async fn generate_recommendations(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
) -> AppResult<(StatusCode, Json<GeneratedResponse>)> {
    let profile = state.current_profile(profile_id).await?;
    let plan = state
        .recommendations
        .generate(&profile, dates::today())
        .await?;
    let recs = state.recommendations.recommendations(&profile).await?;
    Ok((
        StatusCode::CREATED,
        Json(GeneratedResponse {
            plan,
            meals: recs.meals,
            exercises: recs.exercises,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
    Path(date): Path<String>,
) -> AppResult<Json<DailyPlan>> {
    let date = dates::parse_iso(&date).map_err(|e| {
        warn!(error = %e, %date, "bad plan date");
        AppError::InvalidInput(format!("invalid date {:?}, expected YYYY-MM-DD", date))
    })?;

    let profile = state.current_profile(profile_id).await?;
    state
        .recommendations
        .plan_for_date(&profile, date)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no plan for {}", date)))
}
