mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/suggest", post(handlers::suggest))
        .route("/suggest-slot", post(handlers::suggest_slot))
        .route("/refine", post(handlers::refine))
        .route("/confirm", post(handlers::confirm))
        .route("/:week_start_date", get(handlers::get_confirmed_plan))
}
