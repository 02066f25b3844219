use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Which authenticator backs login and registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Accepts any credentials after a fixed delay.
    Mock,
    /// Argon2-hashed passwords kept in the key/value store.
    Password,
}

impl std::str::FromStr for AuthMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(AuthMode::Mock),
            "password" => Ok(AuthMode::Password),
            other => anyhow::bail!("unknown AUTH_MODE {:?}", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub mock_delay_ms: u64,
    pub timeout_secs: u64,
}

impl AuthConfig {
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory for the file store; in-memory when unset.
    pub storage_dir: Option<PathBuf>,
    pub auth: AuthConfig,
    pub jwt: JwtConfig,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_dir = std::env::var("STORAGE_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let auth = AuthConfig {
            mode: match std::env::var("AUTH_MODE") {
                Ok(v) => v.parse()?,
                Err(_) => AuthMode::Mock,
            },
            mock_delay_ms: env_parse("AUTH_MOCK_DELAY_MS", 1000),
            timeout_secs: env_parse("AUTH_TIMEOUT_SECS", 10),
        };
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "metafit".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "metafit-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };
        Ok(Self {
            storage_dir,
            auth,
            jwt,
        })
    }
}
