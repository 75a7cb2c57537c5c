use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub ai_model: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY")?;
        let ai_model =
            std::env::var("AI_MODEL").unwrap_or_else(|_| "claude-sonnet-4-5".into());
        Ok(Self {
            database_url,
            anthropic_api_key,
            ai_model,
        })
    }
}
