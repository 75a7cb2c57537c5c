mod common;

use std::sync::Arc;

use common::{make_member, make_recipe, make_slot, InMemoryPlanStore, InMemoryRecipeStore};
use dinnersolved::domain::meal_plan::Weekday;
use dinnersolved::error::AppError;
use dinnersolved::plan::repo::PlanStore;
use dinnersolved::plan::services::{ConfirmPlan, RecipeSuggestion};
use dinnersolved::recipes::repo::RecipeStore;

#[tokio::test]
async fn new_recipes_enter_the_collection_with_usage_history() {
    let member = make_member("Ada", 1.0);
    let slot = make_slot("Dinner", vec![Weekday::Mon], vec![member.id]);

    let recipes = Arc::new(InMemoryRecipeStore::default());
    let use_case = ConfirmPlan::new(Arc::new(InMemoryPlanStore::new(recipes.clone())));

    let plan = use_case
        .execute(
            "2026-08-31",
            vec![RecipeSuggestion {
                slot: slot.clone(),
                recipe: make_recipe("Pad Thai"),
            }],
        )
        .await
        .unwrap();

    assert_eq!(plan.assignments.len(), 1);
    let stored = recipes.get(plan.assignments[0].recipe_id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Pad Thai");
    assert_eq!(stored.times_used, 1);
    assert!(stored.last_used_at.is_some());
}

#[tokio::test]
async fn name_match_resolves_to_the_existing_record() {
    let member = make_member("Ada", 1.0);
    let slot = make_slot("Dinner", vec![Weekday::Mon], vec![member.id]);

    let mut existing = make_recipe("Pad Thai");
    existing.times_used = 4;
    let existing_id = existing.id;

    let recipes = Arc::new(InMemoryRecipeStore::with_recipes(vec![existing]));
    let use_case = ConfirmPlan::new(Arc::new(InMemoryPlanStore::new(recipes.clone())));

    // Same name, fresh id: the AI does not know the collection's ids.
    let plan = use_case
        .execute(
            "2026-08-31",
            vec![RecipeSuggestion {
                slot,
                recipe: make_recipe("Pad Thai"),
            }],
        )
        .await
        .unwrap();

    assert_eq!(plan.assignments[0].recipe_id, existing_id);
    let stored = recipes.get(existing_id).await.unwrap().unwrap();
    assert_eq!(stored.times_used, 5);
}

#[tokio::test]
async fn merge_preserves_user_curated_fields() {
    let member = make_member("Ada", 1.0);
    let slot = make_slot("Dinner", vec![Weekday::Mon], vec![member.id]);

    let mut existing = make_recipe("Pad Thai");
    existing.is_favorite = true;
    existing.cooking_instructions = Some(vec!["Soak the noodles.".to_string()]);
    let existing_id = existing.id;

    let recipes = Arc::new(InMemoryRecipeStore::with_recipes(vec![existing]));
    let use_case = ConfirmPlan::new(Arc::new(InMemoryPlanStore::new(recipes.clone())));

    let mut candidate = make_recipe("Pad Thai");
    candidate.emoji = "🍜".to_string();
    candidate.prep_time = 25;

    use_case
        .execute("2026-08-31", vec![RecipeSuggestion { slot, recipe: candidate }])
        .await
        .unwrap();

    let stored = recipes.get(existing_id).await.unwrap().unwrap();
    assert_eq!(stored.emoji, "🍜");
    assert_eq!(stored.prep_time, 25);
    assert!(stored.is_favorite);
    assert_eq!(
        stored.cooking_instructions,
        Some(vec!["Soak the noodles.".to_string()])
    );
}

#[tokio::test]
async fn confirming_again_replaces_the_week() {
    let member = make_member("Ada", 1.0);
    let slot = make_slot("Dinner", vec![Weekday::Mon], vec![member.id]);

    let recipes = Arc::new(InMemoryRecipeStore::default());
    let plans = Arc::new(InMemoryPlanStore::new(recipes.clone()));
    let use_case = ConfirmPlan::new(plans.clone());

    use_case
        .execute(
            "2026-08-31",
            vec![RecipeSuggestion {
                slot: slot.clone(),
                recipe: make_recipe("First Choice"),
            }],
        )
        .await
        .unwrap();

    use_case
        .execute(
            "2026-08-31",
            vec![RecipeSuggestion {
                slot,
                recipe: make_recipe("Second Choice"),
            }],
        )
        .await
        .unwrap();

    let plan = plans.get_plan("2026-08-31").await.unwrap().unwrap();
    assert_eq!(plan.assignments.len(), 1);
    let stored = recipes.get(plan.assignments[0].recipe_id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Second Choice");
}

#[tokio::test]
async fn soft_deleted_recipes_hide_from_reads_but_keep_identity() {
    let member = make_member("Ada", 1.0);
    let slot = make_slot("Dinner", vec![Weekday::Mon], vec![member.id]);

    let existing = make_recipe("Pad Thai");
    let existing_id = existing.id;

    let recipes = Arc::new(InMemoryRecipeStore::with_recipes(vec![existing]));
    recipes.soft_delete(existing_id).await.unwrap();
    assert!(recipes.get(existing_id).await.unwrap().is_none());

    let use_case = ConfirmPlan::new(Arc::new(InMemoryPlanStore::new(recipes.clone())));
    let plan = use_case
        .execute(
            "2026-08-31",
            vec![RecipeSuggestion {
                slot,
                recipe: make_recipe("Pad Thai"),
            }],
        )
        .await
        .unwrap();

    // The name match lands on the deleted row, so the recipe keeps its
    // canonical id while staying hidden from reads.
    assert_eq!(plan.assignments[0].recipe_id, existing_id);
    assert!(recipes.get(existing_id).await.unwrap().is_none());
}

#[tokio::test]
async fn explicit_create_rejects_duplicate_names() {
    let recipes = InMemoryRecipeStore::with_recipes(vec![make_recipe("Pad Thai")]);
    let result = recipes.create(&make_recipe("Pad Thai")).await;
    assert!(matches!(result, Err(AppError::Collision(_))));
}
