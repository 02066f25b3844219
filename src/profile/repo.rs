use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::profile::repo_types::Profile;
use crate::storage::{get_json, keys, set_json, KeyValueStore};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile of the signed-in user, if one was persisted.
    async fn load_current(&self) -> anyhow::Result<Option<Profile>>;

    /// Persist `profile` as the signed-in user and archive it under its id.
    async fn save_current(&self, profile: &Profile) -> anyhow::Result<()>;

    async fn clear_current(&self) -> anyhow::Result<()>;

    /// Last profile saved for `id`, signed in or not.
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Profile>>;
}

#[derive(Clone)]
pub struct KvProfileRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvProfileRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for KvProfileRepository {
    async fn load_current(&self) -> anyhow::Result<Option<Profile>> {
        get_json(self.store.as_ref(), keys::CURRENT_USER).await
    }

    async fn save_current(&self, profile: &Profile) -> anyhow::Result<()> {
        set_json(self.store.as_ref(), keys::CURRENT_USER, profile).await?;
        set_json(self.store.as_ref(), &keys::profile(profile.id), profile).await
    }

    async fn clear_current(&self) -> anyhow::Result<()> {
        self.store.remove(keys::CURRENT_USER).await
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        get_json(self.store.as_ref(), &keys::profile(id)).await
    }
}
