use crate::state::AppState;
use axum::Router;

pub mod catalog;
pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo_types::{DailyPlan, Difficulty, Exercise, Meal, MealSlots};
pub use services::{build_daily_plan, RecommendationService};

pub fn router() -> Router<AppState> {
    handlers::recommendation_routes()
}
