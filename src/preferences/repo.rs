use axum::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::preferences::UserPreferences;
use crate::error::AppError;

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get_preferences(&self) -> Result<Option<UserPreferences>, AppError>;
    async fn save_preferences(&self, preferences: &UserPreferences) -> Result<(), AppError>;
}

pub struct PgPreferenceStore {
    db: PgPool,
    household_id: Uuid,
}

impl PgPreferenceStore {
    pub fn new(db: PgPool, household_id: Uuid) -> Self {
        Self { db, household_id }
    }
}

#[derive(FromRow)]
struct PreferencesRow {
    id: Uuid,
    liked_ingredients: Vec<String>,
    disliked_ingredients: Vec<String>,
    cuisine_preferences: Vec<String>,
}

impl From<PreferencesRow> for UserPreferences {
    fn from(r: PreferencesRow) -> Self {
        UserPreferences {
            id: r.id,
            liked_ingredients: r.liked_ingredients,
            disliked_ingredients: r.disliked_ingredients,
            cuisine_preferences: r.cuisine_preferences,
        }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn get_preferences(&self) -> Result<Option<UserPreferences>, AppError> {
        let row = sqlx::query_as::<_, PreferencesRow>(
            r#"
            SELECT id, liked_ingredients, disliked_ingredients, cuisine_preferences
            FROM user_preferences
            WHERE household_id = $1
            "#,
        )
        .bind(self.household_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(UserPreferences::from))
    }

    async fn save_preferences(&self, preferences: &UserPreferences) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences
                (id, household_id, liked_ingredients, disliked_ingredients, cuisine_preferences)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (household_id) DO UPDATE SET
                liked_ingredients = EXCLUDED.liked_ingredients,
                disliked_ingredients = EXCLUDED.disliked_ingredients,
                cuisine_preferences = EXCLUDED.cuisine_preferences
            "#,
        )
        .bind(preferences.id)
        .bind(self.household_id)
        .bind(&preferences.liked_ingredients)
        .bind(&preferences.disliked_ingredients)
        .bind(&preferences.cuisine_preferences)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
