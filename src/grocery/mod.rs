mod dto;
pub mod handlers;
pub mod services;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:week_start_date", get(handlers::get_grocery_list))
}
