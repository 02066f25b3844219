use time::Date;
use tracing::{debug, instrument};

use crate::dashboard::dto::DashboardSummary;
use crate::error::AppResult;
use crate::profile::{services::round1, Profile};
use crate::recommendations::services::{plan_for, Recommendations};
use crate::recommendations::{DailyPlan, RecommendationService};
use crate::weight::{goal_progress_percent, WeightLedger, WeightService};

/// Meals and exercises shown on the home page.
pub const FEATURED: usize = 2;

pub fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

/// Progress from the profile weight towards the goal; zero before onboarding.
pub fn dashboard_progress(profile: &Profile, latest: f64) -> f64 {
    if profile.weight <= 0.0 {
        return 0.0;
    }
    round1(goal_progress_percent(profile.weight, latest, profile.weight_goal))
}

pub fn summarize(
    profile: &Profile,
    ledger: &WeightLedger,
    recs: &Recommendations,
    plans: &[DailyPlan],
    today: Date,
) -> DashboardSummary {
    let latest = ledger.latest(profile.weight);
    DashboardSummary {
        first_name: first_name(&profile.name).to_string(),
        latest_weight: latest,
        weight_lost: round1(profile.weight - latest),
        progress_percent: dashboard_progress(profile, latest),
        today_plan: plan_for(plans, today).cloned(),
        featured_meals: recs.meals.iter().take(FEATURED).cloned().collect(),
        featured_exercises: recs.exercises.iter().take(FEATURED).cloned().collect(),
    }
}

/// Collects the summary, generating recommendations first when the
/// profile has none stored yet.
#[instrument(skip_all, fields(profile_id = %profile.id))]
pub async fn load_dashboard(
    weights: &WeightService,
    recommendations: &RecommendationService,
    profile: &Profile,
    today: Date,
) -> AppResult<DashboardSummary> {
    let mut recs = recommendations.recommendations(profile).await?;
    if recs.is_incomplete() {
        debug!("no stored recommendations; generating");
        recommendations.generate(profile, today).await?;
        recs = recommendations.recommendations(profile).await?;
    }
    let ledger = weights.ledger(profile).await?;
    let plans = recommendations.plans(profile).await?;
    Ok(summarize(profile, &ledger, &recs, &plans, today))
}
