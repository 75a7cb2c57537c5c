use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    ConfirmRequest, ConfirmedAssignmentSchema, ConfirmedPlanSchema, RefineRequest,
    RegenerateSlotRequest, SlotOptionsResponse, SuggestRequest, WeeklyPlanSchema,
};
use super::repo::{PgPlanStore, PlanStore};
use super::services::{ConfirmPlan, RecipeSuggestion, RefineRecipes, SuggestRecipes};
use crate::domain::recipe::Recipe;
use crate::error::AppError;
use crate::household::extractors::HouseholdId;
use crate::household::repo::PgHouseholdStore;
use crate::preferences::repo::PgPreferenceStore;
use crate::rate_limit::{BudgetDecision, FULL_GENERATION_COST, SINGLE_SLOT_COST};
use crate::recipes::repo::{PgRecipeStore, RecipeStore};
use crate::state::AppState;
use crate::template::repo::PgTemplateStore;

fn suggest_use_case(state: &AppState, household_id: Uuid) -> SuggestRecipes {
    SuggestRecipes::new(
        state.ai.clone(),
        Arc::new(PgTemplateStore::new(state.db.clone(), household_id)),
        Arc::new(PgHouseholdStore::new(state.db.clone(), household_id)),
        Arc::new(PgPreferenceStore::new(state.db.clone(), household_id)),
        Arc::new(PgRecipeStore::new(state.db.clone(), household_id)),
    )
}

fn refine_use_case(state: &AppState, household_id: Uuid) -> RefineRecipes {
    RefineRecipes::new(
        state.ai.clone(),
        Arc::new(PgTemplateStore::new(state.db.clone(), household_id)),
        Arc::new(PgHouseholdStore::new(state.db.clone(), household_id)),
        Arc::new(PgPreferenceStore::new(state.db.clone(), household_id)),
    )
}

fn rate_limit_error(decision: &BudgetDecision) -> AppError {
    let retry_after_seconds = decision
        .resets_at
        .map(|at| {
            let seconds = (at - OffsetDateTime::now_utc()).whole_seconds();
            seconds.max(0)
        })
        .unwrap_or(0);
    AppError::RateLimited {
        remaining: decision.remaining,
        retry_after_seconds,
    }
}

#[instrument(skip(state))]
pub async fn get_confirmed_plan(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Path(week_start_date): Path<String>,
) -> Result<Json<ConfirmedPlanSchema>, AppError> {
    let plans = PgPlanStore::new(state.db.clone(), household_id);
    let recipes = PgRecipeStore::new(state.db.clone(), household_id);

    let Some(plan) = plans.get_plan(&week_start_date).await? else {
        return Ok(Json(ConfirmedPlanSchema {
            week_start_date,
            assignments: Vec::new(),
        }));
    };

    let mut assignments = Vec::new();
    for a in &plan.assignments {
        if let Some(recipe) = recipes.get(a.recipe_id).await? {
            assignments.push(ConfirmedAssignmentSchema {
                slot_id: a.slot_id,
                recipe,
            });
        }
    }
    Ok(Json(ConfirmedPlanSchema {
        week_start_date,
        assignments,
    }))
}

#[instrument(skip(state, body))]
pub async fn suggest(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<SuggestRequest>,
) -> Result<Json<SlotOptionsResponse>, AppError> {
    let decision = state
        .rate_limiter
        .check_and_consume(household_id, FULL_GENERATION_COST)
        .await;
    if !decision.allowed {
        return Err(rate_limit_error(&decision));
    }

    let slot_options = suggest_use_case(&state, household_id)
        .execute(body.week_context)
        .await?;

    Ok(Json(SlotOptionsResponse {
        slot_options: slot_options.into_iter().map(Into::into).collect(),
        budget_remaining: decision.remaining,
        budget_resets_at: None,
    }))
}

#[instrument(skip(state, body))]
pub async fn suggest_slot(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<RegenerateSlotRequest>,
) -> Result<Json<SlotOptionsResponse>, AppError> {
    let decision = state
        .rate_limiter
        .check_and_consume(household_id, SINGLE_SLOT_COST)
        .await;
    if !decision.allowed {
        return Err(rate_limit_error(&decision));
    }

    let existing_chosen: HashMap<Uuid, Recipe> = body
        .existing_chosen
        .into_iter()
        .map(|(slot_id, schema)| (slot_id, schema.into()))
        .collect();

    let slot_options = suggest_use_case(&state, household_id)
        .execute_for_slot(body.slot_id, &existing_chosen, body.week_context)
        .await?;

    Ok(Json(SlotOptionsResponse {
        slot_options: vec![slot_options.into()],
        budget_remaining: decision.remaining,
        budget_resets_at: None,
    }))
}

#[instrument(skip(state, body))]
pub async fn refine(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<RefineRequest>,
) -> Result<Json<SlotOptionsResponse>, AppError> {
    let decision = state
        .rate_limiter
        .check_and_consume(household_id, FULL_GENERATION_COST)
        .await;
    if !decision.allowed {
        return Err(rate_limit_error(&decision));
    }

    let existing_assignments: HashMap<Uuid, Recipe> = body
        .existing_assignments
        .into_iter()
        .map(|(slot_id, schema)| (slot_id, schema.into()))
        .collect();

    let slot_options = refine_use_case(&state, household_id)
        .execute(existing_assignments, body.user_message, &body.locked_slot_ids)
        .await?;

    Ok(Json(SlotOptionsResponse {
        slot_options: slot_options.into_iter().map(Into::into).collect(),
        budget_remaining: decision.remaining,
        budget_resets_at: None,
    }))
}

#[instrument(skip(state, body))]
pub async fn confirm(
    State(state): State<AppState>,
    HouseholdId(household_id): HouseholdId,
    Json(body): Json<ConfirmRequest>,
) -> Result<Json<WeeklyPlanSchema>, AppError> {
    let suggestions: Vec<RecipeSuggestion> = body
        .suggestions
        .into_iter()
        .map(|s| RecipeSuggestion {
            slot: s.slot.into(),
            recipe: s.recipe.into(),
        })
        .collect();

    let use_case = ConfirmPlan::new(Arc::new(PgPlanStore::new(state.db.clone(), household_id)));
    let plan = use_case.execute(&body.week_start_date, suggestions).await?;

    Ok(Json(WeeklyPlanSchema {
        id: plan.id,
        week_start_date: plan.week_start_date,
        assignments: plan.assignments,
    }))
}
