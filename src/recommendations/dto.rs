use serde::Serialize;

use crate::recommendations::repo_types::{DailyPlan, Exercise, Meal};

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedResponse {
    pub plan: DailyPlan,
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
}
