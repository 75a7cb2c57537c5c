use axum::{extract::State, Json};
use tracing::instrument;

use super::dto::{MembersResponse, SaveMembersRequest};
use super::extractors::HouseholdId;
use super::repo::{HouseholdStore, PgHouseholdStore};
use crate::domain::household::HouseholdMember;
use crate::error::AppError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_members(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
) -> Result<Json<MembersResponse>, AppError> {
    let store = PgHouseholdStore::new(state.db.clone(), household_id);
    let members = store.get_members().await?;
    Ok(Json(MembersResponse { members }))
}

#[instrument(skip(state, body))]
pub async fn save_members(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<SaveMembersRequest>,
) -> Result<Json<MembersResponse>, AppError> {
    let members: Vec<HouseholdMember> = body.members.into_iter().map(Into::into).collect();
    for member in &members {
        if member.serving_size <= 0.0 {
            return Err(AppError::Validation(format!(
                "serving_size for '{}' must be positive",
                member.name
            )));
        }
    }

    let store = PgHouseholdStore::new(state.db.clone(), household_id);
    store.save_members(&members).await?;
    Ok(Json(MembersResponse { members }))
}
