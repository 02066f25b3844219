use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    error::AppResult,
    state::AppState,
    weight::{
        dto::{RecordWeightRequest, WeightHistoryResponse},
        services::validate_new_weight,
    },
};

pub fn weight_routes() -> Router<AppState> {
    Router::new().route("/weights", get(list_weights).post(record_weight))
}

#[instrument(skip(state))]
pub async fn list_weights(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
) -> AppResult<Json<WeightHistoryResponse>> {
    let profile = state.current_profile(profile_id).await?;
    let ledger = state.weights.ledger(&profile).await?;
    Ok(Json(WeightHistoryResponse {
        entries: ledger.history(),
        progress: ledger.progress(&profile),
    }))
}

/// Appends today's measurement and answers with the updated history.
#[instrument(skip(state))]
pub async fn record_weight(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
    Json(payload): Json<RecordWeightRequest>,
) -> AppResult<(StatusCode, Json<WeightHistoryResponse>)> {
    validate_new_weight(payload.weight)?;

    let profile = state.current_profile(profile_id).await?;
    state.weights.record(&profile, payload.weight).await?;
    let ledger = state.weights.ledger(&profile).await?;
    Ok((
        StatusCode::CREATED,
        Json(WeightHistoryResponse {
            entries: ledger.history(),
            progress: ledger.progress(&profile),
        }),
    ))
}
