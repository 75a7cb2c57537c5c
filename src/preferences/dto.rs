use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SavePreferencesRequest {
    #[serde(default)]
    pub liked_ingredients: Vec<String>,
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
    #[serde(default)]
    pub cuisine_preferences: Vec<String>,
}
