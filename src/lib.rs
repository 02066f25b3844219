pub mod app;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod onboarding;
pub mod profile;
pub mod recommendations;
pub mod session;
pub mod state;
pub mod storage;
pub mod weight;
