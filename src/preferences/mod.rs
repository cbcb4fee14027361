mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use services::{current_preferences, resolve_preferences, EffectivePreferences};

pub fn router() -> Router<AppState> {
    handlers::preference_routes()
}
