use std::collections::HashMap;

use uuid::Uuid;

use super::grocery::GroceryListItem;
use super::household::HouseholdMember;
use super::meal_plan::{MealSlot, WeeklyPlan};
use super::recipe::Recipe;
use super::round2;
use super::serving::total_servings;
use crate::error::AppError;

/// Expand a confirmed week into a merged, sorted shopping list.
///
/// For each slot assignment: scale every ingredient of the assigned recipe by
/// the slot's total servings, then merge lines with the same (lowercased name,
/// unit) pair and sort by category order, then name case-insensitively.
///
/// An assignment whose recipe is missing from `recipes` is skipped; a deleted
/// recipe must not break the rest of the list. An assignment whose slot is
/// missing from `slots` is a broken plan and surfaces as `NotFound`.
pub fn build_grocery_list(
    weekly_plan: &WeeklyPlan,
    slots: &[MealSlot],
    members: &[HouseholdMember],
    recipes: &HashMap<Uuid, Recipe>,
) -> Result<Vec<GroceryListItem>, AppError> {
    let mut raw_items: Vec<GroceryListItem> = Vec::new();

    for assignment in &weekly_plan.assignments {
        let slot = slots
            .iter()
            .find(|s| s.id == assignment.slot_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "slot '{}' not found in template",
                    assignment.slot_id
                ))
            })?;
        let Some(recipe) = recipes.get(&assignment.recipe_id) else {
            continue;
        };
        let servings = total_servings(slot, members);

        for ingredient in &recipe.ingredients {
            raw_items.push(GroceryListItem {
                name: ingredient.name.clone(),
                quantity: round2(ingredient.quantity * servings),
                unit: ingredient.unit.clone(),
                category: ingredient.category,
                recipe_names: vec![recipe.name.clone()],
            });
        }
    }

    Ok(merge_and_sort(raw_items))
}

/// Merge key is (lowercased name, unit): "Chicken, lbs" and "Chicken, oz"
/// stay separate lines.
fn merge_and_sort(items: Vec<GroceryListItem>) -> Vec<GroceryListItem> {
    let mut merged: HashMap<(String, String), GroceryListItem> = HashMap::new();

    for item in items {
        let key = (item.name.to_lowercase(), item.unit.clone());
        match merged.get_mut(&key) {
            Some(existing) => {
                existing.quantity = round2(existing.quantity + item.quantity);
                for name in item.recipe_names {
                    if !existing.recipe_names.contains(&name) {
                        existing.recipe_names.push(name);
                    }
                }
            }
            None => {
                merged.insert(key, item);
            }
        }
    }

    let mut result: Vec<GroceryListItem> = merged.into_values().collect();
    result.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    result
}
