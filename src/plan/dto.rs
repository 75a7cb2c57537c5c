use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::meal_plan::{MealSlot, SlotAssignment};
use crate::domain::recipe::Recipe;
use crate::recipes::dto::RecipeSchema;
use crate::template::dto::SlotSchema;

use super::services::SlotOptions;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub week_context: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegenerateSlotRequest {
    pub slot_id: Uuid,
    /// slot id -> the recipe currently chosen there.
    #[serde(default)]
    pub existing_chosen: HashMap<Uuid, RecipeSchema>,
    #[serde(default)]
    pub week_context: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    #[serde(default)]
    pub existing_assignments: HashMap<Uuid, RecipeSchema>,
    pub user_message: String,
    #[serde(default)]
    pub locked_slot_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub week_start_date: String,
    pub suggestions: Vec<SuggestionSchema>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionSchema {
    pub slot: SlotSchema,
    pub recipe: RecipeSchema,
}

#[derive(Debug, Serialize)]
pub struct SlotOptionsSchema {
    pub slot: MealSlot,
    pub options: Vec<Recipe>,
}

impl From<SlotOptions> for SlotOptionsSchema {
    fn from(so: SlotOptions) -> Self {
        SlotOptionsSchema {
            slot: so.slot,
            options: so.options,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlotOptionsResponse {
    pub slot_options: Vec<SlotOptionsSchema>,
    pub budget_remaining: f64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub budget_resets_at: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyPlanSchema {
    pub id: Uuid,
    pub week_start_date: String,
    pub assignments: Vec<SlotAssignment>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmedAssignmentSchema {
    pub slot_id: Uuid,
    pub recipe: Recipe,
}

#[derive(Debug, Serialize)]
pub struct ConfirmedPlanSchema {
    pub week_start_date: String,
    pub assignments: Vec<ConfirmedAssignmentSchema>,
}
