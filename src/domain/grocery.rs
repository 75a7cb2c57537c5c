use serde::{Deserialize, Serialize};

use super::recipe::GroceryCategory;

/// One line of the shopping list. Ephemeral: computed on demand from a
/// confirmed plan, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryListItem {
    pub name: String,
    /// Rounded to 2 decimals.
    pub quantity: f64,
    pub unit: String,
    pub category: GroceryCategory,
    /// Contributing recipe names, deduplicated, first-seen order.
    pub recipe_names: Vec<String>,
}
