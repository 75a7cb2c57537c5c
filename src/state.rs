use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::claude::ClaudeAdapter;
use crate::ai::AiPort;
use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub ai: Arc<dyn AiPort>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await?;

        let ai = Arc::new(ClaudeAdapter::new(
            config.anthropic_api_key.clone(),
            config.ai_model.clone(),
        )) as Arc<dyn AiPort>;

        Ok(Self {
            db,
            config,
            ai,
            rate_limiter: Arc::new(RateLimiter::new()),
        })
    }
}
