use axum::{extract::State, Json};
use tracing::instrument;
use uuid::Uuid;

use super::dto::SavePreferencesRequest;
use super::repo::{PgPreferenceStore, PreferenceStore};
use crate::domain::preferences::UserPreferences;
use crate::error::AppError;
use crate::household::extractors::HouseholdId;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_preferences(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
) -> Result<Json<UserPreferences>, AppError> {
    let store = PgPreferenceStore::new(state.db.clone(), household_id);
    let preferences = store.get_preferences().await?.unwrap_or_default();
    Ok(Json(preferences))
}

#[instrument(skip(state, body))]
pub async fn save_preferences(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<SavePreferencesRequest>,
) -> Result<Json<UserPreferences>, AppError> {
    let preferences = UserPreferences {
        id: Uuid::new_v4(),
        liked_ingredients: body.liked_ingredients,
        disliked_ingredients: body.disliked_ingredients,
        cuisine_preferences: body.cuisine_preferences,
    };

    let store = PgPreferenceStore::new(state.db.clone(), household_id);
    store.save_preferences(&preferences).await?;
    Ok(Json(preferences))
}
