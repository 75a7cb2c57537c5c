#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use axum::async_trait;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use dinnersolved::ai::{AiPort, RefinementRequest, SuggestionRequest};
use dinnersolved::domain::household::HouseholdMember;
use dinnersolved::domain::meal_plan::{
    MealPlanTemplate, MealSlot, MealType, SlotAssignment, Weekday, WeeklyPlan,
};
use dinnersolved::domain::preferences::UserPreferences;
use dinnersolved::domain::recipe::{GroceryCategory, Ingredient, Recipe};
use dinnersolved::error::AppError;
use dinnersolved::household::repo::HouseholdStore;
use dinnersolved::plan::repo::PlanStore;
use dinnersolved::plan::services::RecipeSuggestion;
use dinnersolved::preferences::repo::PreferenceStore;
use dinnersolved::recipes::repo::{RecipeSort, RecipeStore};
use dinnersolved::template::repo::TemplateStore;

pub fn make_member(name: &str, serving_size: f64) -> HouseholdMember {
    HouseholdMember {
        id: Uuid::new_v4(),
        name: name.to_string(),
        emoji: "🙂".to_string(),
        serving_size,
    }
}

pub fn make_slot(name: &str, days: Vec<Weekday>, member_ids: Vec<Uuid>) -> MealSlot {
    MealSlot {
        id: Uuid::new_v4(),
        name: name.to_string(),
        meal_type: MealType::Dinner,
        days,
        member_ids,
    }
}

pub fn make_template(slots: Vec<MealSlot>) -> MealPlanTemplate {
    MealPlanTemplate {
        id: Uuid::new_v4(),
        slots,
    }
}

pub fn make_ingredient(name: &str, quantity: f64, unit: &str, category: GroceryCategory) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        category,
    }
}

pub fn make_recipe(name: &str) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        name: name.to_string(),
        emoji: "🍽️".to_string(),
        prep_time: 30,
        ingredients: Vec::new(),
        key_ingredients: Vec::new(),
        is_favorite: false,
        source_url: None,
        cooking_instructions: None,
        times_used: 0,
        last_used_at: None,
    }
}

/// Scripted AI port: hand it the response groups up front, and it records
/// every request it sees. An unscripted call panics, which doubles as the
/// assertion that a path never reaches the AI.
#[derive(Default)]
pub struct FakeAiPort {
    pub suggest_responses: Mutex<VecDeque<Vec<Vec<Recipe>>>>,
    pub refine_responses: Mutex<VecDeque<Vec<Vec<Recipe>>>>,
    pub suggest_requests: Mutex<Vec<SuggestionRequest>>,
    pub refine_requests: Mutex<Vec<RefinementRequest>>,
}

impl FakeAiPort {
    pub fn with_suggestions(groups: Vec<Vec<Recipe>>) -> Self {
        let fake = Self::default();
        fake.suggest_responses.lock().unwrap().push_back(groups);
        fake
    }

    pub fn with_refinements(groups: Vec<Vec<Recipe>>) -> Self {
        let fake = Self::default();
        fake.refine_responses.lock().unwrap().push_back(groups);
        fake
    }
}

#[async_trait]
impl AiPort for FakeAiPort {
    async fn suggest_recipes(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<Vec<Recipe>>, AppError> {
        self.suggest_requests.lock().unwrap().push(request.clone());
        let groups = self
            .suggest_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted suggest_recipes call");
        Ok(groups)
    }

    async fn refine_recipes(
        &self,
        request: &RefinementRequest,
    ) -> Result<Vec<Vec<Recipe>>, AppError> {
        self.refine_requests.lock().unwrap().push(request.clone());
        let groups = self
            .refine_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted refine_recipes call");
        Ok(groups)
    }

    async fn generate_instructions(&self, _recipe: &Recipe) -> Result<Vec<String>, AppError> {
        Ok(vec!["Cook it.".to_string()])
    }

    async fn parse_recipe_from_url(&self, _url: &str) -> Result<Recipe, AppError> {
        panic!("unscripted parse_recipe_from_url call")
    }
}

#[derive(Default)]
pub struct InMemoryTemplateStore {
    pub template: Mutex<Option<MealPlanTemplate>>,
}

impl InMemoryTemplateStore {
    pub fn with_template(template: MealPlanTemplate) -> Self {
        Self {
            template: Mutex::new(Some(template)),
        }
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn get_template(&self) -> Result<Option<MealPlanTemplate>, AppError> {
        Ok(self.template.lock().unwrap().clone())
    }

    async fn save_template(&self, template: &MealPlanTemplate) -> Result<(), AppError> {
        *self.template.lock().unwrap() = Some(template.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryHouseholdStore {
    pub members: Mutex<Vec<HouseholdMember>>,
}

impl InMemoryHouseholdStore {
    pub fn with_members(members: Vec<HouseholdMember>) -> Self {
        Self {
            members: Mutex::new(members),
        }
    }
}

#[async_trait]
impl HouseholdStore for InMemoryHouseholdStore {
    async fn get_members(&self) -> Result<Vec<HouseholdMember>, AppError> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn save_members(&self, members: &[HouseholdMember]) -> Result<(), AppError> {
        *self.members.lock().unwrap() = members.to_vec();
        Ok(())
    }

    async fn get_member(&self, member_id: Uuid) -> Result<Option<HouseholdMember>, AppError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == member_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPreferenceStore {
    pub preferences: Mutex<Option<UserPreferences>>,
}

impl InMemoryPreferenceStore {
    pub fn with_preferences(preferences: UserPreferences) -> Self {
        Self {
            preferences: Mutex::new(Some(preferences)),
        }
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get_preferences(&self) -> Result<Option<UserPreferences>, AppError> {
        Ok(self.preferences.lock().unwrap().clone())
    }

    async fn save_preferences(&self, preferences: &UserPreferences) -> Result<(), AppError> {
        *self.preferences.lock().unwrap() = Some(preferences.clone());
        Ok(())
    }
}

/// Mirrors the persistent store's merge rules: resolve by id, then by name,
/// else insert with a usage count of 1. Soft-deleted recipes stay in the
/// vec (the upsert must still resolve identity against them) but are hidden
/// from the read paths, matching the `is_deleted` filtering in Postgres.
#[derive(Default)]
pub struct InMemoryRecipeStore {
    pub recipes: Mutex<Vec<Recipe>>,
    pub deleted: Mutex<HashSet<Uuid>>,
}

impl InMemoryRecipeStore {
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            deleted: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn get(&self, recipe_id: Uuid) -> Result<Option<Recipe>, AppError> {
        if self.deleted.lock().unwrap().contains(&recipe_id) {
            return Ok(None);
        }
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == recipe_id)
            .cloned())
    }

    async fn list(&self, sort: RecipeSort, favorites_only: bool) -> Result<Vec<Recipe>, AppError> {
        let deleted = self.deleted.lock().unwrap();
        let mut recipes: Vec<Recipe> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !deleted.contains(&r.id))
            .filter(|r| !favorites_only || r.is_favorite)
            .cloned()
            .collect();
        match sort {
            RecipeSort::Recent => recipes.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at)),
            RecipeSort::MostUsed => recipes.sort_by(|a, b| b.times_used.cmp(&a.times_used)),
            RecipeSort::Alpha => recipes.sort_by(|a, b| a.name.cmp(&b.name)),
            RecipeSort::FavoritesFirst => {
                recipes.sort_by(|a, b| b.is_favorite.cmp(&a.is_favorite).then(a.name.cmp(&b.name)))
            }
        }
        Ok(recipes)
    }

    async fn recent_names(&self, days: i64) -> Result<Vec<String>, AppError> {
        let cutoff = OffsetDateTime::now_utc() - Duration::days(days);
        let deleted = self.deleted.lock().unwrap();
        let mut recent: Vec<(OffsetDateTime, String)> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !deleted.contains(&r.id))
            .filter_map(|r| {
                r.last_used_at
                    .filter(|used| *used >= cutoff)
                    .map(|used| (used, r.name.clone()))
            })
            .collect();
        recent.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(recent.into_iter().map(|(_, name)| name).collect())
    }

    async fn create(&self, recipe: &Recipe) -> Result<Recipe, AppError> {
        let mut recipes = self.recipes.lock().unwrap();
        if recipes.iter().any(|r| r.name == recipe.name) {
            return Err(AppError::Collision(format!(
                "recipe '{}' already exists",
                recipe.name
            )));
        }
        let mut created = recipe.clone();
        created.times_used = 0;
        created.last_used_at = None;
        recipes.push(created.clone());
        Ok(created)
    }

    async fn upsert(&self, candidate: &Recipe) -> Result<Recipe, AppError> {
        let now = OffsetDateTime::now_utc();
        let mut recipes = self.recipes.lock().unwrap();
        if let Some(existing) = recipes
            .iter_mut()
            .find(|r| r.id == candidate.id)
            .map(|r| {
                r.absorb(candidate, now);
                r.clone()
            })
        {
            return Ok(existing);
        }
        if let Some(existing) = recipes
            .iter_mut()
            .find(|r| r.name == candidate.name)
            .map(|r| {
                r.absorb(candidate, now);
                r.clone()
            })
        {
            return Ok(existing);
        }
        let mut inserted = candidate.clone();
        inserted.times_used = 1;
        inserted.last_used_at = Some(now);
        recipes.push(inserted.clone());
        Ok(inserted)
    }

    async fn toggle_favorite(&self, recipe_id: Uuid) -> Result<Option<Recipe>, AppError> {
        let mut recipes = self.recipes.lock().unwrap();
        Ok(recipes.iter_mut().find(|r| r.id == recipe_id).map(|r| {
            r.is_favorite = !r.is_favorite;
            r.clone()
        }))
    }

    async fn rename(
        &self,
        recipe_id: Uuid,
        name: &str,
        emoji: &str,
    ) -> Result<Option<Recipe>, AppError> {
        let mut recipes = self.recipes.lock().unwrap();
        Ok(recipes.iter_mut().find(|r| r.id == recipe_id).map(|r| {
            r.name = name.to_string();
            r.emoji = emoji.to_string();
            r.clone()
        }))
    }

    async fn soft_delete(&self, recipe_id: Uuid) -> Result<bool, AppError> {
        let exists = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.id == recipe_id);
        if exists {
            self.deleted.lock().unwrap().insert(recipe_id);
        }
        Ok(exists)
    }

    async fn save_instructions(
        &self,
        recipe_id: Uuid,
        instructions: &[String],
    ) -> Result<(), AppError> {
        let mut recipes = self.recipes.lock().unwrap();
        if let Some(r) = recipes.iter_mut().find(|r| r.id == recipe_id) {
            r.cooking_instructions = Some(instructions.to_vec());
        }
        Ok(())
    }
}

pub struct InMemoryPlanStore {
    pub recipes: std::sync::Arc<InMemoryRecipeStore>,
    pub plans: Mutex<HashMap<String, WeeklyPlan>>,
}

impl InMemoryPlanStore {
    pub fn new(recipes: std::sync::Arc<InMemoryRecipeStore>) -> Self {
        Self {
            recipes,
            plans: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn get_plan(&self, week_start_date: &str) -> Result<Option<WeeklyPlan>, AppError> {
        Ok(self.plans.lock().unwrap().get(week_start_date).cloned())
    }

    async fn confirm_plan(
        &self,
        week_start_date: &str,
        suggestions: &[RecipeSuggestion],
    ) -> Result<WeeklyPlan, AppError> {
        let mut assignments = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            let canonical = self.recipes.upsert(&suggestion.recipe).await?;
            assignments.push(SlotAssignment {
                slot_id: suggestion.slot.id,
                recipe_id: canonical.id,
            });
        }
        let plan = WeeklyPlan {
            id: Uuid::new_v4(),
            week_start_date: week_start_date.to_string(),
            assignments,
        };
        self.plans
            .lock()
            .unwrap()
            .insert(week_start_date.to_string(), plan.clone());
        Ok(plan)
    }
}
