use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LEN};
use crate::auth::repo::CredentialRepository;
use crate::auth::repo_types::CredentialRecord;
use crate::error::{AppResult, AuthError, ValidationErrors};
use crate::profile::repo::ProfileRepository;
use crate::profile::Profile;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Stable profile id for an email, so repeated sign-ins reach the same data.
pub fn profile_id_for(email: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, normalize_email(email).as_bytes())
}

/// Registration form check: both password fields must match.
pub fn validate_registration(password: &str, confirm_password: &str) -> AppResult<()> {
    let mut errors = ValidationErrors::new();
    if password != confirm_password {
        errors.add("confirmPassword", "Passwords do not match");
    }
    errors.into_result()
}

/// Exchanges credentials for the profile a session is bound to.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> AppResult<Profile>;
    async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Profile>;
}

/// Demo-only: accepts any credentials after `delay`.
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn demo_profile(email: &str) -> Profile {
        Profile {
            id: profile_id_for(email),
            name: "Demo User".into(),
            email: email.to_string(),
            age: 35,
            weight: 95.0,
            height: 170,
            bmi: 32.9,
            weight_goal: 75.0,
        }
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, email: &str, _password: &str) -> AppResult<Profile> {
        tokio::time::sleep(self.delay).await;
        warn!("mock authenticator accepted credentials without verification");
        Ok(Self::demo_profile(email))
    }

    async fn register(&self, name: &str, email: &str, _password: &str) -> AppResult<Profile> {
        tokio::time::sleep(self.delay).await;
        Ok(Profile::pending_onboarding(profile_id_for(email), name, email))
    }
}

/// Verifies Argon2 password hashes kept in the credential repository.
pub struct CredentialAuthenticator {
    credentials: Arc<dyn CredentialRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl CredentialAuthenticator {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            credentials,
            profiles,
        }
    }
}

#[async_trait]
impl Authenticator for CredentialAuthenticator {
    async fn login(&self, email: &str, password: &str) -> AppResult<Profile> {
        let email = normalize_email(email);
        let record = match self.credentials.find_by_email(&email).await? {
            Some(r) => r,
            None => {
                warn!(email = %email, "login unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &record.password_hash)? {
            warn!(email = %email, profile_id = %record.profile_id, "login invalid password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let profile = self
            .profiles
            .find(record.profile_id)
            .await?
            .unwrap_or_else(|| Profile::pending_onboarding(record.profile_id, "", &email));
        info!(profile_id = %profile.id, "credentials verified");
        Ok(profile)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Profile> {
        let email = normalize_email(email);

        let mut errors = ValidationErrors::new();
        if !is_valid_email(&email) {
            errors.add("email", "Invalid email");
        }
        if password.len() < MIN_PASSWORD_LEN {
            errors.add("password", "Password too short");
        }
        errors.into_result()?;

        if self.credentials.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AuthError::EmailTaken.into());
        }

        let record = CredentialRecord {
            profile_id: profile_id_for(&email),
            password_hash: hash_password(password)?,
            email,
        };
        self.credentials.create(&record).await?;
        info!(profile_id = %record.profile_id, "credentials stored");
        Ok(Profile::pending_onboarding(record.profile_id, name, record.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::KvCredentialRepository;
    use crate::error::AppError;
    use crate::profile::repo::KvProfileRepository;
    use crate::storage::{FileStore, KeyValueStore, MemoryStore};

    fn credential_auth() -> (CredentialAuthenticator, Arc<KvProfileRepository>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let profiles = Arc::new(KvProfileRepository::new(store.clone()));
        let auth = CredentialAuthenticator::new(
            Arc::new(KvCredentialRepository::new(store)),
            profiles.clone(),
        );
        (auth, profiles)
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example.com"));
    }

    #[test]
    fn profile_id_ignores_case_and_whitespace() {
        assert_eq!(profile_id_for(" Ana@Example.com "), profile_id_for("ana@example.com"));
        assert_ne!(profile_id_for("ana@example.com"), profile_id_for("bob@example.com"));
    }

    #[test]
    fn registration_passwords_must_match() {
        assert!(validate_registration("secret123", "secret123").is_ok());
        let err = validate_registration("secret123", "secret124").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.get("confirmPassword").is_some()));
    }

    #[tokio::test]
    async fn mock_login_fabricates_demo_profile() {
        let auth = MockAuthenticator::new(Duration::ZERO);
        let profile = auth.login("demo@example.com", "anything").await.unwrap();
        assert_eq!(profile.email, "demo@example.com");
        assert_eq!(profile.weight, 95.0);
        assert_eq!(profile.height, 170);
        assert_eq!(profile.bmi, 32.9);
        assert_eq!(profile.weight_goal, 75.0);
    }

    #[tokio::test]
    async fn mock_register_zeroes_biometrics() {
        let auth = MockAuthenticator::new(Duration::ZERO);
        let profile = auth.register("Ana", "ana@example.com", "x").await.unwrap();
        assert_eq!(profile.name, "Ana");
        assert!(profile.needs_onboarding());
        assert_eq!(profile.bmi, 0.0);
    }

    #[tokio::test]
    async fn credential_register_then_login() {
        let (auth, _) = credential_auth();
        let registered = auth
            .register("Ana", "Ana@Example.com", "long-enough")
            .await
            .unwrap();
        assert_eq!(registered.email, "ana@example.com");

        let logged_in = auth.login("ana@example.com", "long-enough").await.unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn credential_login_restores_saved_profile() {
        let (auth, profiles) = credential_auth();
        let mut profile = auth.register("Ana", "ana@example.com", "long-enough").await.unwrap();
        profile.weight = 88.0;
        profiles.save_current(&profile).await.unwrap();
        profiles.clear_current().await.unwrap();

        let restored = auth.login("ana@example.com", "long-enough").await.unwrap();
        assert_eq!(restored.weight, 88.0);
        assert_eq!(restored.name, "Ana");
    }

    #[tokio::test]
    async fn credential_login_rejects_wrong_password_and_unknown_email() {
        let (auth, _) = credential_auth();
        auth.register("Ana", "ana@example.com", "long-enough").await.unwrap();

        let err = auth.login("ana@example.com", "wrong-password").await.unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));
        let err = auth.login("nobody@example.com", "long-enough").await.unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn credential_register_rejects_duplicates_and_short_passwords() {
        let (auth, _) = credential_auth();
        auth.register("Ana", "ana@example.com", "long-enough").await.unwrap();

        let err = auth.register("Ana", "ANA@example.com", "long-enough").await.unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::EmailTaken)));

        let err = auth.register("Bob", "bob@example.com", "short").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.get("password").is_some()));
    }

    #[tokio::test]
    async fn file_backed_credentials_do_not_collide() {
        let dir = std::env::temp_dir().join(format!("metafit-creds-{}", Uuid::new_v4()));
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&dir).await.unwrap());
        let auth = CredentialAuthenticator::new(
            Arc::new(KvCredentialRepository::new(store.clone())),
            Arc::new(KvProfileRepository::new(store)),
        );

        let plus = auth.register("Plus", "a+b@x.com", "long-enough").await.unwrap();
        let underscore = auth.register("Under", "a_b@x.com", "other-secret").await.unwrap();
        assert_ne!(plus.id, underscore.id);

        let err = auth.login("a_b@x.com", "long-enough").await.unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
