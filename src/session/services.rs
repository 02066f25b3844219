use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::services::Authenticator;
use crate::error::{AppError, AppResult, AuthError};
use crate::profile::dto::ProfileUpdate;
use crate::profile::repo::ProfileRepository;
use crate::profile::services::apply_update;
use crate::profile::Profile;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(Profile),
}

/// The signed-in user and the entry points that change it.
pub struct SessionStore {
    state: SessionState,
    profiles: Arc<dyn ProfileRepository>,
    authenticator: Arc<dyn Authenticator>,
    auth_timeout: Duration,
}

impl SessionStore {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        authenticator: Arc<dyn Authenticator>,
        auth_timeout: Duration,
    ) -> Self {
        Self {
            state: SessionState::Unauthenticated,
            profiles,
            authenticator,
            auth_timeout,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current(&self) -> Option<&Profile> {
        match &self.state {
            SessionState::Authenticated(profile) => Some(profile),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Profile of the open session, or `NotAuthenticated`.
    pub fn require(&self) -> AppResult<&Profile> {
        self.current().ok_or(AppError::NotAuthenticated)
    }

    /// Profile of the open session when it is the one a token was issued for.
    pub fn require_id(&self, profile_id: Uuid) -> AppResult<&Profile> {
        let profile = self.require()?;
        if profile.id != profile_id {
            warn!(token_profile = %profile_id, session_profile = %profile.id, "token bound to another profile");
            return Err(AppError::NotAuthenticated);
        }
        Ok(profile)
    }

    /// Pick up the session persisted by a previous run.
    #[instrument(skip(self))]
    pub async fn restore(&mut self) -> AppResult<bool> {
        match self.profiles.load_current().await? {
            Some(profile) => {
                info!(profile_id = %profile.id, "session restored");
                self.state = SessionState::Authenticated(profile);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn bounded<F>(&self, call: F) -> AppResult<Profile>
    where
        F: std::future::Future<Output = AppResult<Profile>>,
    {
        match tokio::time::timeout(self.auth_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.auth_timeout, "authenticator did not answer in time");
                Err(AuthError::Timeout.into())
            }
        }
    }

    async fn open(&mut self, profile: Profile) -> AppResult<&Profile> {
        self.profiles.save_current(&profile).await?;
        self.state = SessionState::Authenticated(profile);
        self.require()
    }

    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<&Profile> {
        let authenticator = self.authenticator.clone();
        let profile = self.bounded(authenticator.login(email, password)).await?;
        info!(profile_id = %profile.id, "user logged in");
        self.open(profile).await
    }

    #[instrument(skip(self, password))]
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> AppResult<&Profile> {
        let authenticator = self.authenticator.clone();
        let profile = self
            .bounded(authenticator.register(name, email, password))
            .await?;
        info!(profile_id = %profile.id, "user registered");
        self.open(profile).await
    }

    /// Drop the session and the persisted current-user copy.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> AppResult<()> {
        if let SessionState::Authenticated(profile) = &self.state {
            info!(profile_id = %profile.id, "user logged out");
        }
        self.state = SessionState::Unauthenticated;
        self.profiles.clear_current().await?;
        Ok(())
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> AppResult<&Profile> {
        let next = apply_update(self.require()?, update);
        self.profiles.save_current(&next).await?;
        info!(profile_id = %next.id, bmi = next.bmi, "profile updated");
        self.state = SessionState::Authenticated(next);
        self.require()
    }
}
