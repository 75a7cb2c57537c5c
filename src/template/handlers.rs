use axum::{extract::State, Json};
use tracing::instrument;

use super::dto::SaveTemplateRequest;
use super::repo::{PgTemplateStore, TemplateStore};
use crate::domain::meal_plan::MealPlanTemplate;
use crate::error::AppError;
use crate::household::extractors::HouseholdId;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
) -> Result<Json<MealPlanTemplate>, AppError> {
    let store = PgTemplateStore::new(state.db.clone(), household_id);
    let template = store
        .get_template()
        .await?
        .ok_or_else(|| AppError::NotFound("no template configured yet".into()))?;
    Ok(Json(template))
}

#[instrument(skip(state, body))]
pub async fn save_template(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<SaveTemplateRequest>,
) -> Result<Json<MealPlanTemplate>, AppError> {
    let template: MealPlanTemplate = body.template.into();
    if !template.is_valid() {
        return Err(AppError::Validation(
            "invalid template: every slot must have at least one member and one day assigned"
                .into(),
        ));
    }

    let store = PgTemplateStore::new(state.db.clone(), household_id);
    store.save_template(&template).await?;
    Ok(Json(template))
}
