use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::AppResult,
    onboarding::services::validate_profile_form,
    profile::dto::{ProfileForm, ProfileResponse},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).patch(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state.current_profile(profile_id).await?;
    Ok(Json(profile.into()))
}

/// Profile edit form; BMI follows the new weight and height.
#[instrument(skip(state, form))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
    Json(form): Json<ProfileForm>,
) -> AppResult<Json<ProfileResponse>> {
    let update = validate_profile_form(&form)?;

    let mut session = state.session.lock().await;
    session.require_id(profile_id)?;
    let profile = session.update_profile(&update).await?.clone();
    info!(profile_id = %profile.id, "profile edited");
    Ok(Json(profile.into()))
}
