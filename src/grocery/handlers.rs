use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use super::dto::GroceryListResponse;
use super::services::BuildGroceryList;
use crate::error::AppError;
use crate::household::extractors::HouseholdId;
use crate::household::repo::PgHouseholdStore;
use crate::plan::repo::PgPlanStore;
use crate::recipes::repo::PgRecipeStore;
use crate::state::AppState;
use crate::template::repo::PgTemplateStore;

#[instrument(skip(state))]
pub async fn get_grocery_list(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Path(week_start_date): Path<String>,
) -> Result<Json<GroceryListResponse>, AppError> {
    let use_case = BuildGroceryList::new(
        Arc::new(PgPlanStore::new(state.db.clone(), household_id)),
        Arc::new(PgTemplateStore::new(state.db.clone(), household_id)),
        Arc::new(PgHouseholdStore::new(state.db.clone(), household_id)),
        Arc::new(PgRecipeStore::new(state.db.clone(), household_id)),
    );
    let items = use_case.execute(&week_start_date).await?;
    Ok(Json(GroceryListResponse {
        week_start_date,
        items,
    }))
}
