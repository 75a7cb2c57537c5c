use axum::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::household::HouseholdMember;
use crate::error::AppError;

#[async_trait]
pub trait HouseholdStore: Send + Sync {
    async fn get_members(&self) -> Result<Vec<HouseholdMember>, AppError>;
    /// Wholesale replace: the saved list becomes the household.
    async fn save_members(&self, members: &[HouseholdMember]) -> Result<(), AppError>;
    async fn get_member(&self, member_id: Uuid) -> Result<Option<HouseholdMember>, AppError>;
}

pub struct PgHouseholdStore {
    db: PgPool,
    household_id: Uuid,
}

impl PgHouseholdStore {
    pub fn new(db: PgPool, household_id: Uuid) -> Self {
        Self { db, household_id }
    }
}

#[derive(FromRow)]
struct MemberRow {
    id: Uuid,
    name: String,
    emoji: String,
    serving_size: f64,
}

impl From<MemberRow> for HouseholdMember {
    fn from(r: MemberRow) -> Self {
        HouseholdMember {
            id: r.id,
            name: r.name,
            emoji: r.emoji,
            serving_size: r.serving_size,
        }
    }
}

#[async_trait]
impl HouseholdStore for PgHouseholdStore {
    async fn get_members(&self) -> Result<Vec<HouseholdMember>, AppError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, name, emoji, serving_size
            FROM household_members
            WHERE household_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(self.household_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(HouseholdMember::from).collect())
    }

    async fn save_members(&self, members: &[HouseholdMember]) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM household_members WHERE household_id = $1")
            .bind(self.household_id)
            .execute(&mut *tx)
            .await?;

        for member in members {
            sqlx::query(
                r#"
                INSERT INTO household_members (id, household_id, name, emoji, serving_size)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(member.id)
            .bind(self.household_id)
            .bind(&member.name)
            .bind(&member.emoji)
            .bind(member.serving_size)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_member(&self, member_id: Uuid) -> Result<Option<HouseholdMember>, AppError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, name, emoji, serving_size
            FROM household_members
            WHERE id = $1 AND household_id = $2
            "#,
        )
        .bind(member_id)
        .bind(self.household_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(HouseholdMember::from))
    }
}
