use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod services;

pub use services::{OnboardingWizard, Step};

pub fn router() -> Router<AppState> {
    handlers::onboarding_routes()
}
