use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::ai::{AiPort, RefinementRequest, SuggestionRequest};
use crate::domain::meal_plan::{MealPlanTemplate, MealSlot, WeeklyPlan};
use crate::domain::recipe::Recipe;
use crate::error::AppError;
use crate::household::repo::HouseholdStore;
use crate::preferences::repo::PreferenceStore;
use crate::recipes::repo::RecipeStore;
use crate::template::repo::TemplateStore;

use super::repo::PlanStore;

/// Candidate count the AI capability must return for every slot it is asked
/// about. Anything else is a malformed response, surfaced as-is.
pub const OPTIONS_PER_SLOT: usize = 3;

/// How far back "recently used" recipe names reach when asking for variety.
pub const RECENT_LOOKBACK_DAYS: i64 = 14;

#[derive(Debug, Clone)]
pub struct SlotOptions {
    pub slot: MealSlot,
    pub options: Vec<Recipe>,
}

/// The single chosen recipe per slot, as confirmed by the user.
#[derive(Debug, Clone)]
pub struct RecipeSuggestion {
    pub slot: MealSlot,
    pub recipe: Recipe,
}

fn validate_option_groups(groups: &[Vec<Recipe>], expected_slots: usize) -> Result<(), AppError> {
    if groups.len() != expected_slots {
        return Err(AppError::Validation(format!(
            "expected {expected_slots} slot option group(s) from AI, got {}",
            groups.len()
        )));
    }
    for (i, group) in groups.iter().enumerate() {
        if group.len() != OPTIONS_PER_SLOT {
            return Err(AppError::Validation(format!(
                "slot {i}: expected {OPTIONS_PER_SLOT} recipe options, got {}",
                group.len()
            )));
        }
    }
    Ok(())
}

pub struct SuggestRecipes {
    ai: Arc<dyn AiPort>,
    templates: Arc<dyn TemplateStore>,
    households: Arc<dyn HouseholdStore>,
    preferences: Arc<dyn PreferenceStore>,
    recipes: Arc<dyn RecipeStore>,
}

impl SuggestRecipes {
    pub fn new(
        ai: Arc<dyn AiPort>,
        templates: Arc<dyn TemplateStore>,
        households: Arc<dyn HouseholdStore>,
        preferences: Arc<dyn PreferenceStore>,
        recipes: Arc<dyn RecipeStore>,
    ) -> Self {
        Self {
            ai,
            templates,
            households,
            preferences,
            recipes,
        }
    }

    async fn load_template(&self) -> Result<MealPlanTemplate, AppError> {
        let template = self.templates.get_template().await?;
        match template {
            Some(t) if !t.slots.is_empty() => Ok(t),
            _ => Err(AppError::Configuration(
                "no meal plan template configured".into(),
            )),
        }
    }

    async fn build_request(
        &self,
        slots: Vec<MealSlot>,
        week_context: Option<String>,
    ) -> Result<SuggestionRequest, AppError> {
        let members = self.households.get_members().await?;
        let preferences = self.preferences.get_preferences().await?.unwrap_or_default();
        let recent = self.recipes.recent_names(RECENT_LOOKBACK_DAYS).await?;
        Ok(SuggestionRequest {
            slots,
            members,
            disliked_ingredients: preferences.disliked_ingredients,
            liked_ingredients: preferences.liked_ingredients,
            cuisine_preferences: preferences.cuisine_preferences,
            week_context,
            recent_recipe_names: recent,
        })
    }

    /// Fresh suggestions for every template slot: 3 options each, in slot
    /// order.
    pub async fn execute(
        &self,
        week_context: Option<String>,
    ) -> Result<Vec<SlotOptions>, AppError> {
        let template = self.load_template().await?;
        let request = self
            .build_request(template.slots.clone(), week_context)
            .await?;

        let groups = self.ai.suggest_recipes(&request).await?;
        validate_option_groups(&groups, template.slots.len())?;

        Ok(template
            .slots
            .into_iter()
            .zip(groups)
            .map(|(slot, options)| SlotOptions { slot, options })
            .collect())
    }

    /// Fresh options for a single slot; the other slots' current choices are
    /// folded into the week context so the generator avoids duplicating them.
    pub async fn execute_for_slot(
        &self,
        slot_id: Uuid,
        existing_chosen: &HashMap<Uuid, Recipe>,
        week_context: Option<String>,
    ) -> Result<SlotOptions, AppError> {
        let template = self.load_template().await?;
        let slot = template
            .slots
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("slot '{slot_id}' not found in template"))
            })?;

        let mut context_parts: Vec<String> = Vec::new();
        if let Some(ctx) = week_context {
            context_parts.push(ctx);
        }
        if !existing_chosen.is_empty() {
            let names = existing_chosen
                .values()
                .map(|r| r.name.clone())
                .collect::<Vec<_>>()
                .join(", ");
            context_parts.push(format!(
                "Other slots already have: {names} — suggest something different"
            ));
        }
        let context = if context_parts.is_empty() {
            None
        } else {
            Some(context_parts.join("; "))
        };

        let request = self.build_request(vec![slot.clone()], context).await?;
        let mut groups = self.ai.suggest_recipes(&request).await?;
        validate_option_groups(&groups, 1)?;

        Ok(SlotOptions {
            slot,
            options: groups.remove(0),
        })
    }
}

pub struct RefineRecipes {
    ai: Arc<dyn AiPort>,
    templates: Arc<dyn TemplateStore>,
    households: Arc<dyn HouseholdStore>,
    preferences: Arc<dyn PreferenceStore>,
}

impl RefineRecipes {
    pub fn new(
        ai: Arc<dyn AiPort>,
        templates: Arc<dyn TemplateStore>,
        households: Arc<dyn HouseholdStore>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            ai,
            templates,
            households,
            preferences,
        }
    }

    /// Regenerate options for every slot not in `locked_slot_ids`. The
    /// unlocked set is computed fresh on every call; when everything is
    /// locked the AI port is never touched.
    pub async fn execute(
        &self,
        existing_assignments: HashMap<Uuid, Recipe>,
        user_message: String,
        locked_slot_ids: &[Uuid],
    ) -> Result<Vec<SlotOptions>, AppError> {
        let template = self.templates.get_template().await?;
        let template = match template {
            Some(t) if !t.slots.is_empty() => t,
            _ => {
                return Err(AppError::Configuration(
                    "no meal plan template configured".into(),
                ))
            }
        };

        let unlocked: Vec<MealSlot> = template
            .slots
            .iter()
            .filter(|s| !locked_slot_ids.contains(&s.id))
            .cloned()
            .collect();
        if unlocked.is_empty() {
            return Ok(Vec::new());
        }

        let members = self.households.get_members().await?;
        let preferences = self.preferences.get_preferences().await?.unwrap_or_default();

        let request = RefinementRequest {
            slots: template.slots,
            members,
            disliked_ingredients: preferences.disliked_ingredients,
            liked_ingredients: preferences.liked_ingredients,
            cuisine_preferences: preferences.cuisine_preferences,
            existing_assignments,
            user_message,
            locked_slot_ids: locked_slot_ids.to_vec(),
        };

        let groups = self.ai.refine_recipes(&request).await?;
        validate_option_groups(&groups, unlocked.len())?;

        Ok(unlocked
            .into_iter()
            .zip(groups)
            .map(|(slot, options)| SlotOptions { slot, options })
            .collect())
    }
}

pub struct ConfirmPlan {
    plans: Arc<dyn PlanStore>,
}

impl ConfirmPlan {
    pub fn new(plans: Arc<dyn PlanStore>) -> Self {
        Self { plans }
    }

    /// Persist one chosen recipe per slot for the week. Each recipe goes
    /// through the identity-resolving upsert and the assignment list carries
    /// the canonical ids; a pre-existing plan for the week is replaced
    /// wholesale. The store performs all of it atomically.
    pub async fn execute(
        &self,
        week_start_date: &str,
        suggestions: Vec<RecipeSuggestion>,
    ) -> Result<WeeklyPlan, AppError> {
        self.plans.confirm_plan(week_start_date, &suggestions).await
    }
}
