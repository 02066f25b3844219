use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::storage::{get_json, keys, set_json, KeyValueStore};
use crate::weight::repo_types::Observation;

#[async_trait]
pub trait WeightRepository: Send + Sync {
    /// `None` when nothing was ever stored for the profile.
    async fn load(&self, profile_id: Uuid) -> anyhow::Result<Option<Vec<Observation>>>;
    async fn save(&self, profile_id: Uuid, observations: &[Observation]) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct KvWeightRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvWeightRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WeightRepository for KvWeightRepository {
    async fn load(&self, profile_id: Uuid) -> anyhow::Result<Option<Vec<Observation>>> {
        get_json(self.store.as_ref(), &keys::weights(profile_id)).await
    }

    async fn save(&self, profile_id: Uuid, observations: &[Observation]) -> anyhow::Result<()> {
        set_json(self.store.as_ref(), &keys::weights(profile_id), observations).await
    }
}
