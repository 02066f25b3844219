pub mod services;

pub use services::{SessionState, SessionStore};
