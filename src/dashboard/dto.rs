use serde::Serialize;

use crate::recommendations::repo_types::{DailyPlan, Exercise, Meal};

/// Home page: weight summary, today's plan and a few suggestions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub first_name: String,
    pub latest_weight: f64,
    /// Starting weight minus latest; zero or negative before any loss.
    pub weight_lost: f64,
    pub progress_percent: f64,
    pub today_plan: Option<DailyPlan>,
    pub featured_meals: Vec<Meal>,
    pub featured_exercises: Vec<Exercise>,
}
