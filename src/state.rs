use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::jwt::JwtKeys;
use crate::auth::repo::KvCredentialRepository;
use crate::auth::services::{Authenticator, CredentialAuthenticator, MockAuthenticator};
use crate::config::{AppConfig, AuthConfig, AuthMode, JwtConfig};
use crate::error::AppResult;
use crate::profile::Profile;
use crate::profile::repo::{KvProfileRepository, ProfileRepository};
use crate::recommendations::repo::KvPlanRepository;
use crate::recommendations::RecommendationService;
use crate::session::SessionStore;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::weight::repo::KvWeightRepository;
use crate::weight::WeightService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub session: Arc<Mutex<SessionStore>>,
    pub weights: WeightService,
    pub recommendations: RecommendationService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let store: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "using file storage");
                Arc::new(FileStore::open(dir).await?)
            }
            None => {
                tracing::warn!("STORAGE_DIR not set; state is kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };

        let state = Self::from_parts(Arc::new(config), store);
        let restored = state.session.lock().await.restore().await?;
        if !restored {
            tracing::info!("no persisted session");
        }
        Ok(state)
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn KeyValueStore>) -> Self {
        let profiles: Arc<dyn ProfileRepository> = Arc::new(KvProfileRepository::new(store.clone()));
        let authenticator: Arc<dyn Authenticator> = match config.auth.mode {
            AuthMode::Mock => Arc::new(MockAuthenticator::new(config.auth.mock_delay())),
            AuthMode::Password => Arc::new(CredentialAuthenticator::new(
                Arc::new(KvCredentialRepository::new(store.clone())),
                profiles.clone(),
            )),
        };
        let session = SessionStore::new(profiles, authenticator, config.auth.timeout());

        Self {
            keys: JwtKeys::from(&config.jwt),
            session: Arc::new(Mutex::new(session)),
            weights: WeightService::new(Arc::new(KvWeightRepository::new(store.clone()))),
            recommendations: RecommendationService::new(Arc::new(KvPlanRepository::new(store))),
            config,
        }
    }

    /// Snapshot of the session profile a token subject refers to.
    pub async fn current_profile(&self, profile_id: Uuid) -> AppResult<Profile> {
        let session = self.session.lock().await;
        Ok(session.require_id(profile_id)?.clone())
    }

    /// In-memory state with instant authentication, for tests.
    pub fn fake() -> Self {
        Self::fake_with_mode(AuthMode::Mock)
    }

    pub fn fake_with_mode(mode: AuthMode) -> Self {
        let config = Arc::new(AppConfig {
            storage_dir: None,
            auth: AuthConfig {
                mode,
                mock_delay_ms: 0,
                timeout_secs: 5,
            },
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
        });
        Self::from_parts(config, Arc::new(MemoryStore::new()))
    }
}
