use axum::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::meal_plan::{SlotAssignment, WeeklyPlan};
use crate::error::AppError;
use crate::recipes::repo::upsert_recipe;

use super::services::RecipeSuggestion;

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn get_plan(&self, week_start_date: &str) -> Result<Option<WeeklyPlan>, AppError>;
    /// Atomically upsert every suggested recipe and write the plan with the
    /// canonical recipe ids, replacing any plan already confirmed for this
    /// week. All-or-nothing: a failure leaves no partial plan behind.
    async fn confirm_plan(
        &self,
        week_start_date: &str,
        suggestions: &[RecipeSuggestion],
    ) -> Result<WeeklyPlan, AppError>;
}

pub struct PgPlanStore {
    db: PgPool,
    household_id: Uuid,
}

impl PgPlanStore {
    pub fn new(db: PgPool, household_id: Uuid) -> Self {
        Self { db, household_id }
    }
}

#[derive(FromRow)]
struct AssignmentRow {
    slot_id: Uuid,
    recipe_id: Uuid,
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn get_plan(&self, week_start_date: &str) -> Result<Option<WeeklyPlan>, AppError> {
        let plan_id: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM weekly_plans WHERE household_id = $1 AND week_start_date = $2",
        )
        .bind(self.household_id)
        .bind(week_start_date)
        .fetch_optional(&self.db)
        .await?;
        let Some((plan_id,)) = plan_id else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, AssignmentRow>(
            "SELECT slot_id, recipe_id FROM slot_assignments WHERE plan_id = $1 ORDER BY position ASC",
        )
        .bind(plan_id)
        .fetch_all(&self.db)
        .await?;

        Ok(Some(WeeklyPlan {
            id: plan_id,
            week_start_date: week_start_date.to_string(),
            assignments: rows
                .into_iter()
                .map(|r| SlotAssignment {
                    slot_id: r.slot_id,
                    recipe_id: r.recipe_id,
                })
                .collect(),
        }))
    }

    async fn confirm_plan(
        &self,
        week_start_date: &str,
        suggestions: &[RecipeSuggestion],
    ) -> Result<WeeklyPlan, AppError> {
        let mut tx = self.db.begin().await?;

        let mut assignments = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            let canonical = upsert_recipe(&mut *tx, self.household_id, &suggestion.recipe).await?;
            assignments.push(SlotAssignment {
                slot_id: suggestion.slot.id,
                recipe_id: canonical.id,
            });
        }

        // Full overwrite of any plan already confirmed for this week; the
        // cascade drops its assignments.
        sqlx::query("DELETE FROM weekly_plans WHERE household_id = $1 AND week_start_date = $2")
            .bind(self.household_id)
            .bind(week_start_date)
            .execute(&mut *tx)
            .await?;

        let plan_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO weekly_plans (id, household_id, week_start_date) VALUES ($1, $2, $3)",
        )
        .bind(plan_id)
        .bind(self.household_id)
        .bind(week_start_date)
        .execute(&mut *tx)
        .await?;

        for (position, assignment) in assignments.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO slot_assignments (id, plan_id, slot_id, recipe_id, position)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(plan_id)
            .bind(assignment.slot_id)
            .bind(assignment.recipe_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(WeeklyPlan {
            id: plan_id,
            week_start_date: week_start_date.to_string(),
            assignments,
        })
    }
}
