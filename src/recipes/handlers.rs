use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::dto::{ImportRecipeRequest, RecipeSchema, UpdateRecipeRequest};
use super::repo::{PgRecipeStore, RecipeSort, RecipeStore};
use crate::domain::recipe::Recipe;
use crate::error::AppError;
use crate::household::extractors::HouseholdId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub sort: RecipeSort,
    #[serde(default)]
    pub favorites_only: bool,
}

fn store(state: &AppState, household_id: Uuid) -> PgRecipeStore {
    PgRecipeStore::new(state.db.clone(), household_id)
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let recipes = store(&state, household_id)
        .list(q.sort, q.favorites_only)
        .await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = store(&state, household_id)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe '{id}' not found")))?;
    Ok(Json(recipe))
}

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<RecipeSchema>,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    let recipe: Recipe = body.into();
    let created = store(&state, household_id).create(&recipe).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, body))]
pub async fn update_recipe(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = store(&state, household_id)
        .rename(id, &body.name, &body.emoji)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe '{id}' not found")))?;
    Ok(Json(recipe))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = store(&state, household_id).soft_delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("recipe '{id}' not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = store(&state, household_id)
        .toggle_favorite(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe '{id}' not found")))?;
    Ok(Json(recipe))
}

/// Instructions are generated lazily: stored ones win, a miss calls the AI
/// capability and persists the result.
#[instrument(skip(state))]
pub async fn generate_instructions(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<String>>, AppError> {
    let store = store(&state, household_id);
    let recipe = store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe '{id}' not found")))?;

    if let Some(instructions) = &recipe.cooking_instructions {
        return Ok(Json(instructions.clone()));
    }

    let instructions = state.ai.generate_instructions(&recipe).await?;
    store.save_instructions(id, &instructions).await?;
    Ok(Json(instructions))
}

/// Returns a draft recipe parsed from the URL; persisting it is a separate,
/// explicit create.
#[instrument(skip(state, body))]
pub async fn import_recipe(
    State(state): State<AppState>,
    HouseholdId(_household_id): HouseholdId,
    Json(body): Json<ImportRecipeRequest>,
) -> Result<Json<Recipe>, AppError> {
    let draft = state.ai.parse_recipe_from_url(&body.url).await?;
    Ok(Json(draft))
}
