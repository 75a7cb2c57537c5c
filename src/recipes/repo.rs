use axum::async_trait;
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::domain::recipe::{Ingredient, Recipe};
use crate::error::AppError;

const UNIQUE_NAME_CONSTRAINT: &str = "uq_recipe_household_name";

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSort {
    #[default]
    Recent,
    MostUsed,
    Alpha,
    FavoritesFirst,
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn get(&self, recipe_id: Uuid) -> Result<Option<Recipe>, AppError>;
    async fn list(&self, sort: RecipeSort, favorites_only: bool) -> Result<Vec<Recipe>, AppError>;
    /// Names of recipes confirmed within the last `days` days, newest first.
    async fn recent_names(&self, days: i64) -> Result<Vec<String>, AppError>;
    /// Explicit creation (manual entry / confirmed import): `times_used = 0`,
    /// and a duplicate name is a `Collision`, never a merge.
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, AppError>;
    /// Confirmation-driven upsert: resolve by id, then by name, else insert.
    /// Returns the canonical record.
    async fn upsert(&self, candidate: &Recipe) -> Result<Recipe, AppError>;
    async fn toggle_favorite(&self, recipe_id: Uuid) -> Result<Option<Recipe>, AppError>;
    async fn rename(&self, recipe_id: Uuid, name: &str, emoji: &str)
        -> Result<Option<Recipe>, AppError>;
    async fn soft_delete(&self, recipe_id: Uuid) -> Result<bool, AppError>;
    async fn save_instructions(
        &self,
        recipe_id: Uuid,
        instructions: &[String],
    ) -> Result<(), AppError>;
}

pub struct PgRecipeStore {
    db: PgPool,
    household_id: Uuid,
}

impl PgRecipeStore {
    pub fn new(db: PgPool, household_id: Uuid) -> Self {
        Self { db, household_id }
    }
}

#[derive(FromRow)]
struct RecipeRow {
    id: Uuid,
    name: String,
    emoji: String,
    prep_time: i32,
    ingredients: Json<Vec<Ingredient>>,
    key_ingredients: Vec<String>,
    is_favorite: bool,
    source_url: Option<String>,
    cooking_instructions: Option<Vec<String>>,
    times_used: i32,
    last_used_at: Option<OffsetDateTime>,
}

impl From<RecipeRow> for Recipe {
    fn from(r: RecipeRow) -> Self {
        Recipe {
            id: r.id,
            name: r.name,
            emoji: r.emoji,
            prep_time: r.prep_time,
            ingredients: r.ingredients.0,
            key_ingredients: r.key_ingredients,
            is_favorite: r.is_favorite,
            source_url: r.source_url,
            cooking_instructions: r.cooking_instructions,
            times_used: r.times_used,
            last_used_at: r.last_used_at,
        }
    }
}

const RECIPE_COLUMNS: &str = "id, name, emoji, prep_time, ingredients, key_ingredients, \
                              is_favorite, source_url, cooking_instructions, times_used, last_used_at";

// The fetch helpers below intentionally see soft-deleted rows: the upsert
// must resolve identity against them so a re-suggested recipe keeps its
// canonical id and history. Read paths filter `is_deleted` themselves.
async fn fetch_by_id(
    conn: &mut PgConnection,
    household_id: Uuid,
    recipe_id: Uuid,
) -> Result<Option<RecipeRow>, AppError> {
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND household_id = $2"
    ))
    .bind(recipe_id)
    .bind(household_id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

async fn fetch_by_name(
    conn: &mut PgConnection,
    household_id: Uuid,
    name: &str,
) -> Result<Option<RecipeRow>, AppError> {
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes WHERE name = $1 AND household_id = $2"
    ))
    .bind(name)
    .bind(household_id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Confirmation-driven upsert, shared between `PgRecipeStore::upsert` and
/// the plan confirmation transaction. Id match wins, then name match within
/// the household; otherwise insert. The `ON CONFLICT` clause is the backstop
/// for two confirms racing on the same new name: the loser folds into an
/// update instead of violating the unique constraint.
pub(crate) async fn upsert_recipe(
    conn: &mut PgConnection,
    household_id: Uuid,
    candidate: &Recipe,
) -> Result<Recipe, AppError> {
    let existing = match fetch_by_id(&mut *conn, household_id, candidate.id).await? {
        Some(row) => Some(row),
        None => fetch_by_name(&mut *conn, household_id, &candidate.name).await?,
    };

    if let Some(row) = existing {
        let mut canonical = Recipe::from(row);
        canonical.absorb(candidate, OffsetDateTime::now_utc());
        sqlx::query(
            r#"
            UPDATE recipes
            SET emoji = $3, prep_time = $4, ingredients = $5, key_ingredients = $6,
                times_used = $7, last_used_at = $8
            WHERE id = $1 AND household_id = $2
            "#,
        )
        .bind(canonical.id)
        .bind(household_id)
        .bind(&canonical.emoji)
        .bind(canonical.prep_time)
        .bind(Json(&canonical.ingredients))
        .bind(&canonical.key_ingredients)
        .bind(canonical.times_used)
        .bind(canonical.last_used_at)
        .execute(conn)
        .await?;
        Ok(canonical)
    } else {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            INSERT INTO recipes (id, household_id, name, emoji, prep_time, ingredients,
                                 key_ingredients, is_favorite, source_url, times_used, last_used_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 1, now())
            ON CONFLICT (household_id, name) DO UPDATE SET
                emoji = EXCLUDED.emoji,
                prep_time = EXCLUDED.prep_time,
                ingredients = EXCLUDED.ingredients,
                key_ingredients = EXCLUDED.key_ingredients,
                times_used = recipes.times_used + 1,
                last_used_at = EXCLUDED.last_used_at
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(candidate.id)
        .bind(household_id)
        .bind(&candidate.name)
        .bind(&candidate.emoji)
        .bind(candidate.prep_time)
        .bind(Json(&candidate.ingredients))
        .bind(&candidate.key_ingredients)
        .bind(candidate.is_favorite)
        .bind(&candidate.source_url)
        .fetch_one(conn)
        .await?;
        Ok(row.into())
    }
}

fn map_unique_violation(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.constraint() == Some(UNIQUE_NAME_CONSTRAINT) {
            return AppError::Collision(format!("a recipe named '{name}' already exists"));
        }
    }
    AppError::Database(e)
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn get(&self, recipe_id: Uuid) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             WHERE id = $1 AND household_id = $2 AND is_deleted = FALSE"
        ))
        .bind(recipe_id)
        .bind(self.household_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(Recipe::from))
    }

    async fn list(&self, sort: RecipeSort, favorites_only: bool) -> Result<Vec<Recipe>, AppError> {
        let order_by = match sort {
            RecipeSort::Recent => "last_used_at DESC NULLS LAST",
            RecipeSort::MostUsed => "times_used DESC, name ASC",
            RecipeSort::Alpha => "name ASC",
            RecipeSort::FavoritesFirst => "is_favorite DESC, last_used_at DESC NULLS LAST",
        };
        let favorites_clause = if favorites_only {
            " AND is_favorite = TRUE"
        } else {
            ""
        };
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             WHERE household_id = $1 AND is_deleted = FALSE{favorites_clause} \
             ORDER BY {order_by}"
        ))
        .bind(self.household_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn recent_names(&self, days: i64) -> Result<Vec<String>, AppError> {
        let since = OffsetDateTime::now_utc() - Duration::days(days);
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT name FROM recipes
            WHERE household_id = $1 AND last_used_at >= $2 AND is_deleted = FALSE
            ORDER BY last_used_at DESC
            "#,
        )
        .bind(self.household_id)
        .bind(since)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn create(&self, recipe: &Recipe) -> Result<Recipe, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            INSERT INTO recipes (id, household_id, name, emoji, prep_time, ingredients,
                                 key_ingredients, is_favorite, source_url, times_used, last_used_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, NULL)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(recipe.id)
        .bind(self.household_id)
        .bind(&recipe.name)
        .bind(&recipe.emoji)
        .bind(recipe.prep_time)
        .bind(Json(&recipe.ingredients))
        .bind(&recipe.key_ingredients)
        .bind(recipe.is_favorite)
        .bind(&recipe.source_url)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, &recipe.name))?;
        Ok(row.into())
    }

    async fn upsert(&self, candidate: &Recipe) -> Result<Recipe, AppError> {
        let mut tx = self.db.begin().await?;
        let canonical = upsert_recipe(&mut *tx, self.household_id, candidate).await?;
        tx.commit().await?;
        Ok(canonical)
    }

    async fn toggle_favorite(&self, recipe_id: Uuid) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "UPDATE recipes SET is_favorite = NOT is_favorite \
             WHERE id = $1 AND household_id = $2 \
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(recipe_id)
        .bind(self.household_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(Recipe::from))
    }

    async fn rename(
        &self,
        recipe_id: Uuid,
        name: &str,
        emoji: &str,
    ) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "UPDATE recipes SET name = $3, emoji = $4 \
             WHERE id = $1 AND household_id = $2 \
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(recipe_id)
        .bind(self.household_id)
        .bind(name)
        .bind(emoji)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, name))?;
        Ok(row.map(Recipe::from))
    }

    async fn soft_delete(&self, recipe_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE recipes SET is_deleted = TRUE WHERE id = $1 AND household_id = $2",
        )
        .bind(recipe_id)
        .bind(self.household_id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_instructions(
        &self,
        recipe_id: Uuid,
        instructions: &[String],
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE recipes SET cooking_instructions = $3 WHERE id = $1 AND household_id = $2",
        )
        .bind(recipe_id)
        .bind(self.household_id)
        .bind(instructions)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
