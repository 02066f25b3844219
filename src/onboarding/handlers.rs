use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::AppResult,
    onboarding::{dto::OnboardingForm, services::validate_onboarding},
    profile::dto::ProfileResponse,
    state::AppState,
};

pub fn onboarding_routes() -> Router<AppState> {
    Router::new().route("/onboarding", post(complete_onboarding))
}

/// Whole questionnaire in one request; every step is checked.
#[instrument(skip(state, form))]
pub async fn complete_onboarding(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
    Json(form): Json<OnboardingForm>,
) -> AppResult<Json<ProfileResponse>> {
    let update = validate_onboarding(&form)?;

    let mut session = state.session.lock().await;
    session.require_id(profile_id)?;
    let profile = session.update_profile(&update).await?.clone();
    info!(profile_id = %profile.id, bmi = profile.bmi, "onboarding completed");
    Ok(Json(profile.into()))
}
