pub mod claude;

use std::collections::HashMap;

use axum::async_trait;
use uuid::Uuid;

use crate::domain::household::HouseholdMember;
use crate::domain::meal_plan::MealSlot;
use crate::domain::recipe::Recipe;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub slots: Vec<MealSlot>,
    pub members: Vec<HouseholdMember>,
    pub disliked_ingredients: Vec<String>,
    pub liked_ingredients: Vec<String>,
    pub cuisine_preferences: Vec<String>,
    pub week_context: Option<String>,
    /// Recipe names used recently, so the generator aims for variety.
    pub recent_recipe_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RefinementRequest {
    /// All template slots, locked ones included: the generator needs the
    /// full plan for context even though it only regenerates unlocked slots.
    pub slots: Vec<MealSlot>,
    pub members: Vec<HouseholdMember>,
    pub disliked_ingredients: Vec<String>,
    pub liked_ingredients: Vec<String>,
    pub cuisine_preferences: Vec<String>,
    /// slot id -> currently chosen recipe.
    pub existing_assignments: HashMap<Uuid, Recipe>,
    /// Free-text instruction, e.g. "swap the pasta for something lighter".
    pub user_message: String,
    pub locked_slot_ids: Vec<Uuid>,
}

/// The recipe-generation capability. Owns all content concerns (prompting,
/// model choice); callers validate only the cardinality of what comes back.
#[async_trait]
pub trait AiPort: Send + Sync {
    /// Returns 3 recipe options per requested slot, outer list in slot order.
    async fn suggest_recipes(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<Vec<Recipe>>, AppError>;

    /// Returns 3 options per *unlocked* slot, in unlocked-slot order.
    async fn refine_recipes(
        &self,
        request: &RefinementRequest,
    ) -> Result<Vec<Vec<Recipe>>, AppError>;

    /// Step-by-step cooking instructions for a recipe.
    async fn generate_instructions(&self, recipe: &Recipe) -> Result<Vec<String>, AppError>;

    /// Parse a recipe out of a webpage. Returns a draft, not persisted.
    async fn parse_recipe_from_url(&self, url: &str) -> Result<Recipe, AppError>;
}
