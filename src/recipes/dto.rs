use serde::Deserialize;
use uuid::Uuid;

use crate::domain::recipe::{GroceryCategory, Ingredient, Recipe};

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientSchema {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: GroceryCategory,
}

impl From<IngredientSchema> for Ingredient {
    fn from(s: IngredientSchema) -> Self {
        Ingredient {
            name: s.name,
            quantity: s.quantity,
            unit: s.unit,
            category: s.category,
        }
    }
}

/// Incoming recipe payload. AI-suggested recipes arrive without an id, so a
/// fresh one is generated; identity is resolved by name at confirm time.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSchema {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub prep_time: i32,
    #[serde(default)]
    pub ingredients: Vec<IngredientSchema>,
    #[serde(default)]
    pub key_ingredients: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl From<RecipeSchema> for Recipe {
    fn from(s: RecipeSchema) -> Self {
        Recipe {
            id: s.id,
            name: s.name,
            emoji: s.emoji,
            prep_time: s.prep_time,
            ingredients: s.ingredients.into_iter().map(Into::into).collect(),
            key_ingredients: s.key_ingredients,
            is_favorite: s.is_favorite,
            source_url: s.source_url,
            cooking_instructions: None,
            times_used: 0,
            last_used_at: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportRecipeRequest {
    pub url: String,
}
