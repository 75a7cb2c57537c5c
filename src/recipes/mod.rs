pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_recipes))
        .route("/", post(handlers::create_recipe))
        .route("/import", post(handlers::import_recipe))
        .route("/:id", get(handlers::get_recipe))
        .route("/:id", patch(handlers::update_recipe))
        .route("/:id", delete(handlers::delete_recipe))
        .route("/:id/favorite", post(handlers::toggle_favorite))
        .route("/:id/instructions", post(handlers::generate_instructions))
}
