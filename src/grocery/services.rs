use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::grocery::GroceryListItem;
use crate::domain::grocery_list::build_grocery_list;
use crate::domain::recipe::Recipe;
use crate::error::AppError;
use crate::household::repo::HouseholdStore;
use crate::plan::repo::PlanStore;
use crate::recipes::repo::RecipeStore;
use crate::template::repo::TemplateStore;

pub struct BuildGroceryList {
    plans: Arc<dyn PlanStore>,
    templates: Arc<dyn TemplateStore>,
    households: Arc<dyn HouseholdStore>,
    recipes: Arc<dyn RecipeStore>,
}

impl BuildGroceryList {
    pub fn new(
        plans: Arc<dyn PlanStore>,
        templates: Arc<dyn TemplateStore>,
        households: Arc<dyn HouseholdStore>,
        recipes: Arc<dyn RecipeStore>,
    ) -> Self {
        Self {
            plans,
            templates,
            households,
            recipes,
        }
    }

    pub async fn execute(&self, week_start_date: &str) -> Result<Vec<GroceryListItem>, AppError> {
        let plan = self.plans.get_plan(week_start_date).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "no confirmed plan found for week '{week_start_date}'"
            ))
        })?;

        let template = self.templates.get_template().await?.ok_or_else(|| {
            AppError::Configuration("no meal plan template configured".into())
        })?;
        let members = self.households.get_members().await?;

        // Deleted recipes simply drop out of the map and their assignments
        // are skipped downstream.
        let mut recipes: HashMap<Uuid, Recipe> = HashMap::new();
        for assignment in &plan.assignments {
            if let Some(recipe) = self.recipes.get(assignment.recipe_id).await? {
                recipes.insert(assignment.recipe_id, recipe);
            }
        }

        build_grocery_list(&plan, &template.slots, &members, &recipes)
    }
}
