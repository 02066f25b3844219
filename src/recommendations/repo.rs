use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::recommendations::repo_types::{DailyPlan, Exercise, Meal};
use crate::storage::{get_json, keys, set_json, KeyValueStore};

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn load_meals(&self, profile_id: Uuid) -> anyhow::Result<Vec<Meal>>;
    async fn save_meals(&self, profile_id: Uuid, meals: &[Meal]) -> anyhow::Result<()>;
    async fn load_exercises(&self, profile_id: Uuid) -> anyhow::Result<Vec<Exercise>>;
    async fn save_exercises(&self, profile_id: Uuid, exercises: &[Exercise]) -> anyhow::Result<()>;
    async fn load_plans(&self, profile_id: Uuid) -> anyhow::Result<Vec<DailyPlan>>;
    async fn save_plans(&self, profile_id: Uuid, plans: &[DailyPlan]) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct KvPlanRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvPlanRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PlanRepository for KvPlanRepository {
    async fn load_meals(&self, profile_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        Ok(get_json(self.store.as_ref(), &keys::meals(profile_id))
            .await?
            .unwrap_or_default())
    }

    async fn save_meals(&self, profile_id: Uuid, meals: &[Meal]) -> anyhow::Result<()> {
        set_json(self.store.as_ref(), &keys::meals(profile_id), meals).await
    }

    async fn load_exercises(&self, profile_id: Uuid) -> anyhow::Result<Vec<Exercise>> {
        Ok(get_json(self.store.as_ref(), &keys::exercises(profile_id))
            .await?
            .unwrap_or_default())
    }

    async fn save_exercises(&self, profile_id: Uuid, exercises: &[Exercise]) -> anyhow::Result<()> {
        set_json(self.store.as_ref(), &keys::exercises(profile_id), exercises).await
    }

    async fn load_plans(&self, profile_id: Uuid) -> anyhow::Result<Vec<DailyPlan>> {
        Ok(get_json(self.store.as_ref(), &keys::plans(profile_id))
            .await?
            .unwrap_or_default())
    }

    async fn save_plans(&self, profile_id: Uuid, plans: &[DailyPlan]) -> anyhow::Result<()> {
        set_json(self.store.as_ref(), &keys::plans(profile_id), plans).await
    }
}
