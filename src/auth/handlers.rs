use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        services::validate_registration,
    },
    error::{AppError, AppResult},
    profile::{dto::ProfileResponse, Profile},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

fn issue(keys: &JwtKeys, profile: Profile) -> AppResult<AuthResponse> {
    let (access_token, refresh_token) = keys.sign_pair(profile.id)?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: ProfileResponse::from(profile),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_registration(&payload.password, &payload.confirm_password)?;

    let profile = {
        // held through the authenticator call; other routes wait for it
        let mut session = state.session.lock().await;
        session
            .register(&payload.name, &payload.email, &payload.password)
            .await?
            .clone()
    };

    let keys = JwtKeys::from_ref(&state);
    info!(profile_id = %profile.id, "session opened by registration");
    Ok(Json(issue(&keys, profile)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let profile = {
        // held through the authenticator call; other routes wait for it
        let mut session = state.session.lock().await;
        session.login(&payload.email, &payload.password).await?.clone()
    };

    let keys = JwtKeys::from_ref(&state);
    info!(profile_id = %profile.id, "session opened by login");
    Ok(Json(issue(&keys, profile)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AppError::NotAuthenticated
    })?;

    // Only the open session can be refreshed
    let profile = state.current_profile(claims.sub).await?;
    Ok(Json(issue(&keys, profile)?))
}

#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(profile_id): AuthUser,
) -> AppResult<StatusCode> {
    let mut session = state.session.lock().await;
    session.require_id(profile_id)?;
    session.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthMode;
    use crate::error::AuthError;

    fn register_request(password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn login_returns_tokens_bound_to_profile() {
        let state = AppState::fake();
        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "demo@example.com".into(),
                password: "whatever".into(),
            }),
        )
        .await
        .unwrap();

        let claims = state.keys.verify(&resp.access_token).unwrap();
        assert_eq!(claims.sub, resp.user.profile.id);
        assert_eq!(resp.user.profile.bmi, 32.9);
        assert!(!resp.user.needs_onboarding);
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords() {
        let state = AppState::fake();
        let err = register(State(state.clone()), Json(register_request("secret123", "secret321")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.get("confirmPassword").is_some()));
        assert!(!state.session.lock().await.is_authenticated());
    }

    #[tokio::test]
    async fn register_opens_pending_onboarding_session() {
        let state = AppState::fake_with_mode(AuthMode::Password);
        let Json(resp) = register(State(state), Json(register_request("secret123", "secret123")))
            .await
            .unwrap();
        assert!(resp.user.needs_onboarding);
        assert_eq!(resp.user.profile.name, "Ana");
    }

    #[tokio::test]
    async fn password_mode_rejects_wrong_password() {
        let state = AppState::fake_with_mode(AuthMode::Password);
        register(State(state.clone()), Json(register_request("secret123", "secret123")))
            .await
            .unwrap();

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "ana@example.com".into(),
                password: "not-it-at-all".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn refresh_requires_the_open_session() {
        let state = AppState::fake();
        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "demo@example.com".into(),
                password: "pw".into(),
            }),
        )
        .await
        .unwrap();
        let profile_id = resp.user.profile.id;

        let Json(again) = refresh(
            State(state.clone()),
            Json(RefreshRequest {
                refresh_token: resp.refresh_token.clone(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(again.user.profile.id, profile_id);

        let status = logout(State(state.clone()), AuthUser(profile_id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = refresh(
            State(state),
            Json(RefreshRequest {
                refresh_token: resp.refresh_token,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
    }

    #[tokio::test]
    async fn access_token_is_not_a_refresh_token() {
        let state = AppState::fake();
        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "demo@example.com".into(),
                password: "pw".into(),
            }),
        )
        .await
        .unwrap();
        let err = refresh(
            State(state),
            Json(RefreshRequest {
                refresh_token: resp.access_token,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
    }
}
