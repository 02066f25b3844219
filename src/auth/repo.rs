use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::repo_types::CredentialRecord;
use crate::storage::{get_json, keys, set_json, KeyValueStore};

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find a login by normalized email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<CredentialRecord>>;

    async fn create(&self, record: &CredentialRecord) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct KvCredentialRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvCredentialRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialRepository for KvCredentialRepository {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<CredentialRecord>> {
        get_json(self.store.as_ref(), &keys::credentials(email)).await
    }

    async fn create(&self, record: &CredentialRecord) -> anyhow::Result<()> {
        set_json(self.store.as_ref(), &keys::credentials(&record.email), record).await
    }
}
