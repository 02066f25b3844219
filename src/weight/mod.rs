use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo_types::Observation;
pub use services::{goal_progress_percent, WeightLedger, WeightService};

pub fn router() -> Router<AppState> {
    handlers::weight_routes()
}
