use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Grocery categories in display/sort order. The grocery list is sorted by
/// this declaration order, so the derived `Ord` is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroceryCategory {
    Produce,
    Meat,
    Dairy,
    Pantry,
    Frozen,
    Bakery,
    Other,
}

impl GroceryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroceryCategory::Produce => "produce",
            GroceryCategory::Meat => "meat",
            GroceryCategory::Dairy => "dairy",
            GroceryCategory::Pantry => "pantry",
            GroceryCategory::Frozen => "frozen",
            GroceryCategory::Bakery => "bakery",
            GroceryCategory::Other => "other",
        }
    }
}

/// Quantity is always normalized to exactly 1 standard serving; all household
/// scaling happens in the grocery list computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: GroceryCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    /// Unique per household; the durable identity key across AI regenerations.
    pub name: String,
    pub emoji: String,
    /// Minutes.
    pub prep_time: i32,
    pub ingredients: Vec<Ingredient>,
    /// Short display summary, e.g. ["chicken", "rice"].
    pub key_ingredients: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub source_url: Option<String>,
    /// None until generated on demand.
    #[serde(default)]
    pub cooking_instructions: Option<Vec<String>>,
    #[serde(default)]
    pub times_used: i32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_used_at: Option<OffsetDateTime>,
}

impl Recipe {
    /// Fold a freshly generated candidate into this canonical record: the
    /// AI-curated presentation fields are overwritten, usage history advances,
    /// and user-curated state (id, is_favorite, cooking_instructions) stays.
    pub fn absorb(&mut self, candidate: &Recipe, now: OffsetDateTime) {
        self.emoji = candidate.emoji.clone();
        self.prep_time = candidate.prep_time;
        self.key_ingredients = candidate.key_ingredients.clone();
        self.ingredients = candidate.ingredients.clone();
        self.times_used += 1;
        self.last_used_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn recipe(name: &str) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: name.to_string(),
            emoji: "🍝".to_string(),
            prep_time: 30,
            ingredients: vec![Ingredient {
                name: "Pasta".to_string(),
                quantity: 2.0,
                unit: "oz".to_string(),
                category: GroceryCategory::Pantry,
            }],
            key_ingredients: vec!["pasta".to_string()],
            is_favorite: false,
            source_url: None,
            cooking_instructions: None,
            times_used: 0,
            last_used_at: None,
        }
    }

    #[test]
    fn absorb_keeps_canonical_id_and_advances_history() {
        let mut canonical = recipe("Pasta Bake");
        canonical.times_used = 4;
        let original_id = canonical.id;

        let mut candidate = recipe("Pasta Bake");
        candidate.emoji = "🥘".to_string();
        candidate.prep_time = 45;

        let now = datetime!(2026-02-23 18:00 UTC);
        canonical.absorb(&candidate, now);

        assert_eq!(canonical.id, original_id);
        assert_eq!(canonical.emoji, "🥘");
        assert_eq!(canonical.prep_time, 45);
        assert_eq!(canonical.times_used, 5);
        assert_eq!(canonical.last_used_at, Some(now));
    }

    #[test]
    fn absorb_preserves_user_curated_fields() {
        let mut canonical = recipe("Tacos");
        canonical.is_favorite = true;
        canonical.cooking_instructions = Some(vec!["Step 1".to_string()]);

        let candidate = recipe("Tacos");
        canonical.absorb(&candidate, datetime!(2026-02-23 18:00 UTC));

        assert!(canonical.is_favorite);
        assert_eq!(
            canonical.cooking_instructions,
            Some(vec!["Step 1".to_string()])
        );
    }

    #[test]
    fn absorb_replaces_ingredient_list() {
        let mut canonical = recipe("Stir Fry");
        let mut candidate = recipe("Stir Fry");
        candidate.ingredients = vec![Ingredient {
            name: "Broccoli".to_string(),
            quantity: 0.5,
            unit: "lbs".to_string(),
            category: GroceryCategory::Produce,
        }];

        canonical.absorb(&candidate, datetime!(2026-02-23 18:00 UTC));

        assert_eq!(canonical.ingredients.len(), 1);
        assert_eq!(canonical.ingredients[0].name, "Broccoli");
    }
}
