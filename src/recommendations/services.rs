use std::sync::Arc;

use time::Date;
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};
use crate::profile::Profile;
use crate::recommendations::catalog;
use crate::recommendations::repo::PlanRepository;
use crate::recommendations::repo_types::{DailyPlan, Exercise, Meal, MealSlots};

const BREAKFAST: usize = 2;
const LUNCH: usize = 0;
const DINNER: usize = 1;
const EXERCISES: [usize; 2] = [0, 2];

/// The fixed candidate set: `(meals, exercises)`.
pub fn catalog() -> (Vec<Meal>, Vec<Exercise>) {
    (catalog::meals(), catalog::exercises())
}

fn pick<T: Clone>(items: &[T], index: usize, what: &str) -> AppResult<T> {
    items.get(index).cloned().ok_or_else(|| {
        AppError::InvalidInput(format!(
            "catalog has {} {}, plan needs index {}",
            items.len(),
            what,
            index
        ))
    })
}

/// Assemble the plan for `date` from fixed catalog positions.
pub fn build_daily_plan(date: Date, meals: &[Meal], exercises: &[Exercise]) -> AppResult<DailyPlan> {
    let slots = MealSlots {
        breakfast: pick(meals, BREAKFAST, "meals")?,
        lunch: pick(meals, LUNCH, "meals")?,
        dinner: pick(meals, DINNER, "meals")?,
        snacks: Vec::new(),
    };
    let exercises = EXERCISES
        .iter()
        .map(|&i| pick(exercises, i, "exercises"))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(DailyPlan {
        date,
        meals: slots,
        exercises,
        water_intake: 0,
        notes: String::new(),
    })
}

/// First plan stored for `date`; later duplicates are never returned.
pub fn plan_for(plans: &[DailyPlan], date: Date) -> Option<&DailyPlan> {
    plans.iter().find(|p| p.date == date)
}

/// Catalog snapshots stored for one profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
}

impl Recommendations {
    pub fn is_incomplete(&self) -> bool {
        self.meals.is_empty() || self.exercises.is_empty()
    }
}

#[derive(Clone)]
pub struct RecommendationService {
    repo: Arc<dyn PlanRepository>,
}

impl RecommendationService {
    pub fn new(repo: Arc<dyn PlanRepository>) -> Self {
        Self { repo }
    }

    /// Store the catalog for `profile` and append a plan for `date`.
    ///
    /// Running this twice for one date appends a second plan next to the first.
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn generate(&self, profile: &Profile, date: Date) -> AppResult<DailyPlan> {
        let (meals, exercises) = catalog();
        let plan = build_daily_plan(date, &meals, &exercises)?;

        let mut plans = self.repo.load_plans(profile.id).await?;
        plans.push(plan.clone());

        self.repo.save_meals(profile.id, &meals).await?;
        self.repo.save_exercises(profile.id, &exercises).await?;
        self.repo.save_plans(profile.id, &plans).await?;
        info!(%date, plans = plans.len(), "recommendations generated");
        Ok(plan)
    }

    pub async fn recommendations(&self, profile: &Profile) -> AppResult<Recommendations> {
        Ok(Recommendations {
            meals: self.repo.load_meals(profile.id).await?,
            exercises: self.repo.load_exercises(profile.id).await?,
        })
    }

    pub async fn plans(&self, profile: &Profile) -> AppResult<Vec<DailyPlan>> {
        Ok(self.repo.load_plans(profile.id).await?)
    }

    pub async fn plan_for_date(&self, profile: &Profile, date: Date) -> AppResult<Option<DailyPlan>> {
        let plans = self.repo.load_plans(profile.id).await?;
        Ok(plan_for(&plans, date).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::repo::KvPlanRepository;
    use crate::storage::MemoryStore;
    use time::macros::date;
    use uuid::Uuid;

    fn service() -> RecommendationService {
        RecommendationService::new(Arc::new(KvPlanRepository::new(Arc::new(MemoryStore::new()))))
    }

    fn profile() -> Profile {
        Profile::pending_onboarding(Uuid::new_v4(), "Demo", "demo@example.com")
    }

    #[test]
    fn plan_uses_fixed_positions() {
        let (meals, exercises) = catalog();
        let plan = build_daily_plan(date!(2024 - 06 - 01), &meals, &exercises).unwrap();
        assert_eq!(plan.meals.breakfast.id, "3");
        assert_eq!(plan.meals.lunch.id, "1");
        assert_eq!(plan.meals.dinner.id, "2");
        assert!(plan.meals.snacks.is_empty());
        let ids: Vec<&str> = plan.exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(plan.water_intake, 0);
        assert!(plan.notes.is_empty());
    }

    #[test]
    fn plan_rejects_short_catalog() {
        let (meals, exercises) = catalog();
        let err = build_daily_plan(date!(2024 - 06 - 01), &meals[..2], &exercises).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn plan_serializes_date_as_iso_day() {
        let (meals, exercises) = catalog();
        let plan = build_daily_plan(date!(2024 - 06 - 01), &meals, &exercises).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["date"], "2024-06-01");
        assert_eq!(json["waterIntake"], 0);
    }

    #[tokio::test]
    async fn regenerating_appends_duplicate_and_lookup_returns_first() {
        let svc = service();
        let p = profile();
        let day = date!(2024 - 06 - 01);

        let first = svc.generate(&p, day).await.unwrap();
        svc.generate(&p, day).await.unwrap();

        let plans = svc.plans(&p).await.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(svc.plan_for_date(&p, day).await.unwrap(), Some(first));
        assert_eq!(svc.plan_for_date(&p, date!(2024 - 06 - 02)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn generate_stores_catalog_snapshots() {
        let svc = service();
        let p = profile();
        assert!(svc.recommendations(&p).await.unwrap().is_incomplete());

        svc.generate(&p, date!(2024 - 06 - 01)).await.unwrap();
        let recs = svc.recommendations(&p).await.unwrap();
        assert_eq!(recs.meals.len(), 3);
        assert_eq!(recs.exercises.len(), 4);
    }
}
