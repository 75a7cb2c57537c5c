use axum::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AiPort, RefinementRequest, SuggestionRequest};
use crate::domain::recipe::{GroceryCategory, Ingredient, Recipe};
use crate::error::AppError;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = r#"You are a meal planning assistant for Dinner Solved.
When asked to suggest recipes, respond ONLY with a valid JSON array of arrays.
Each inner array contains exactly 3 distinct recipe options for one slot.
Structure: [[option1, option2, option3], [option1, option2, option3], ...]

Each recipe must follow this exact structure:
{
  "name": "Recipe Name",
  "emoji": "🍝",
  "prep_time": 30,
  "key_ingredients": ["ingredient1", "ingredient2", "ingredient3"],
  "ingredients": [
    {"name": "ingredient name", "quantity": 1.5, "unit": "lbs", "category": "meat"}
  ]
}
IMPORTANT: All ingredient quantities must be scaled for exactly 1 standard serving.
The app handles all scaling for household size automatically.
All quantities must reflect the raw, pre-cooking weight or volume as purchased.
Valid category values: produce, meat, dairy, pantry, frozen, bakery, other
Valid unit examples: lbs, oz, cups, tbsp, tsp, whole, cloves, slices, cans
The 3 options per slot must be meaningfully different from each other.
No additional text outside the JSON array."#;

pub struct ClaudeAdapter {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct RecipePayload {
    name: String,
    #[serde(default = "default_emoji")]
    emoji: String,
    #[serde(default = "default_prep_time")]
    prep_time: i32,
    #[serde(default)]
    key_ingredients: Vec<String>,
    #[serde(default)]
    ingredients: Vec<IngredientPayload>,
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Deserialize)]
struct IngredientPayload {
    name: String,
    quantity: f64,
    unit: String,
    category: GroceryCategory,
}

fn default_emoji() -> String {
    "🍽️".to_string()
}

fn default_prep_time() -> i32 {
    30
}

impl From<RecipePayload> for Recipe {
    fn from(p: RecipePayload) -> Self {
        Recipe {
            // Generated recipes get a fresh id every time; the canonical id
            // is resolved by name at confirm time.
            id: Uuid::new_v4(),
            name: p.name,
            emoji: p.emoji,
            prep_time: p.prep_time,
            ingredients: p
                .ingredients
                .into_iter()
                .map(|i| Ingredient {
                    name: i.name,
                    quantity: i.quantity,
                    unit: i.unit,
                    category: i.category,
                })
                .collect(),
            key_ingredients: p.key_ingredients,
            is_favorite: false,
            source_url: p.source_url,
            cooking_instructions: None,
            times_used: 0,
            last_used_at: None,
        }
    }
}

impl ClaudeAdapter {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, AppError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Ai(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Ai(format!("upstream returned {status}: {detail}")));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Ai(format!("malformed response body: {e}")))?;
        let text = parsed
            .content
            .first()
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default();
        Ok(text)
    }

    async fn call_and_parse(&self, prompt: &str) -> Result<Vec<Vec<Recipe>>, AppError> {
        let raw = self.complete(SYSTEM_PROMPT, prompt, 8192).await?;
        let json = strip_code_fences(&raw);
        let groups: Vec<Vec<RecipePayload>> = serde_json::from_str(json)
            .map_err(|e| AppError::Validation(format!("malformed AI recipe payload: {e}")))?;
        Ok(groups
            .into_iter()
            .map(|g| g.into_iter().map(Recipe::from).collect())
            .collect())
    }

    fn suggestion_prompt(request: &SuggestionRequest) -> String {
        let slots_desc = request
            .slots
            .iter()
            .map(|s| {
                format!(
                    "- {} ({}, {} days)",
                    s.name,
                    s.meal_type.as_str(),
                    s.day_count()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let member_names = request
            .members
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = vec![
            format!("Suggest 3 different recipe options for each of these meal slots:\n{slots_desc}"),
            String::new(),
            "Household context:".to_string(),
            format!("- Members: {member_names}"),
        ];
        if !request.disliked_ingredients.is_empty() {
            lines.push(format!(
                "- Disliked ingredients: {}",
                request.disliked_ingredients.join(", ")
            ));
        }
        if !request.liked_ingredients.is_empty() {
            lines.push(format!(
                "- Liked ingredients: {}",
                request.liked_ingredients.join(", ")
            ));
        }
        if !request.cuisine_preferences.is_empty() {
            lines.push(format!(
                "- Preferred cuisines: {}",
                request.cuisine_preferences.join(", ")
            ));
        }
        if let Some(ctx) = &request.week_context {
            lines.push(format!("- This week: {ctx}"));
        }
        if !request.recent_recipe_names.is_empty() {
            lines.push(format!(
                "- Used in the last 2 weeks (aim for variety): {}",
                request.recent_recipe_names.join(", ")
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "Return a JSON array of arrays with exactly {} inner arrays, each containing exactly 3 recipe objects.",
            request.slots.len()
        ));
        lines.join("\n")
    }

    fn refinement_prompt(request: &RefinementRequest, unlocked: &[&crate::domain::meal_plan::MealSlot]) -> String {
        let existing_desc = request
            .existing_assignments
            .iter()
            .map(|(slot_id, recipe)| format!("- {slot_id}: {}", recipe.name))
            .collect::<Vec<_>>()
            .join("\n");
        let locked_desc = request
            .slots
            .iter()
            .filter(|s| request.locked_slot_ids.contains(&s.id))
            .map(|s| format!("- {} (LOCKED — do not change)", s.name))
            .collect::<Vec<_>>()
            .join("\n");
        let unlocked_desc = unlocked
            .iter()
            .map(|s| {
                format!(
                    "- {} ({}, {} days)",
                    s.name,
                    s.meal_type.as_str(),
                    s.day_count()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut lines = vec![
            format!("User request: \"{}\"", request.user_message),
            String::new(),
            "Current meal plan:".to_string(),
            existing_desc,
        ];
        if !locked_desc.is_empty() {
            lines.push(String::new());
            lines.push("Locked slots (keep as-is):".to_string());
            lines.push(locked_desc);
        }
        lines.push(String::new());
        lines.push(format!(
            "Provide 3 options for each of these {} unlocked slot(s):",
            unlocked.len()
        ));
        lines.push(unlocked_desc);
        lines.push(String::new());
        lines.push(format!(
            "Return a JSON array of arrays with exactly {} inner arrays, each containing exactly 3 recipe objects.",
            unlocked.len()
        ));
        lines.join("\n")
    }
}

#[async_trait]
impl AiPort for ClaudeAdapter {
    async fn suggest_recipes(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<Vec<Recipe>>, AppError> {
        let prompt = Self::suggestion_prompt(request);
        self.call_and_parse(&prompt).await
    }

    async fn refine_recipes(
        &self,
        request: &RefinementRequest,
    ) -> Result<Vec<Vec<Recipe>>, AppError> {
        let unlocked: Vec<_> = request
            .slots
            .iter()
            .filter(|s| !request.locked_slot_ids.contains(&s.id))
            .collect();
        if unlocked.is_empty() {
            return Ok(Vec::new());
        }
        let prompt = Self::refinement_prompt(request, &unlocked);
        self.call_and_parse(&prompt).await
    }

    async fn generate_instructions(&self, recipe: &Recipe) -> Result<Vec<String>, AppError> {
        let ingredients_text = recipe
            .ingredients
            .iter()
            .map(|i| format!("- {} {} {}", i.quantity, i.unit, i.name))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "Recipe: {}\nPrep time: {} minutes\nIngredients (per serving):\n{}\n\n\
             Return step-by-step cooking instructions as a JSON array of strings. \
             Each string is one step (1-3 sentences). Aim for 6-10 steps total.",
            recipe.name, recipe.prep_time, ingredients_text
        );
        let system = "You are a cooking assistant. Return cooking instructions as a JSON array \
                      of step strings. Respond ONLY with the JSON array. No additional text.";

        let raw = self.complete(system, &prompt, 1024).await?;
        let steps: Vec<String> = serde_json::from_str(strip_code_fences(&raw))
            .map_err(|e| AppError::Validation(format!("malformed AI instructions payload: {e}")))?;
        Ok(steps)
    }

    async fn parse_recipe_from_url(&self, url: &str) -> Result<Recipe, AppError> {
        let prompt = format!(
            "Extract the recipe from this page: {url}\n\n\
             Return a single recipe JSON object in the standard structure, with \
             ingredient quantities normalized to 1 standard serving. Set source_url \
             to the page URL. If the page contains no recipe, return the JSON null."
        );
        let raw = self.complete(SYSTEM_PROMPT, &prompt, 4096).await?;
        let payload: Option<RecipePayload> = serde_json::from_str(strip_code_fences(&raw))
            .map_err(|e| AppError::Validation(format!("malformed AI recipe payload: {e}")))?;
        let payload =
            payload.ok_or_else(|| AppError::NotFound(format!("no recipe found at '{url}'")))?;
        let mut recipe = Recipe::from(payload);
        if recipe.source_url.is_none() {
            recipe.source_url = Some(url.to_string());
        }
        Ok(recipe)
    }
}

/// Models occasionally wrap JSON in markdown fences despite instructions.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim_end_matches('`').trim()
}
