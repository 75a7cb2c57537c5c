use axum::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::meal_plan::{MealPlanTemplate, MealSlot, MealType, Weekday};
use crate::error::AppError;

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn get_template(&self) -> Result<Option<MealPlanTemplate>, AppError>;
    /// Replace-the-whole-template semantics.
    async fn save_template(&self, template: &MealPlanTemplate) -> Result<(), AppError>;
}

pub struct PgTemplateStore {
    db: PgPool,
    household_id: Uuid,
}

impl PgTemplateStore {
    pub fn new(db: PgPool, household_id: Uuid) -> Self {
        Self { db, household_id }
    }
}

#[derive(FromRow)]
struct SlotRow {
    id: Uuid,
    name: String,
    meal_type: String,
    days: Vec<String>,
    member_ids: Vec<Uuid>,
}

impl SlotRow {
    fn into_slot(self) -> Result<MealSlot, AppError> {
        let meal_type = MealType::parse(&self.meal_type).ok_or_else(|| {
            AppError::Validation(format!("unknown meal type '{}' in storage", self.meal_type))
        })?;
        let days = self
            .days
            .iter()
            .map(|d| {
                Weekday::parse(d)
                    .ok_or_else(|| AppError::Validation(format!("unknown weekday '{d}' in storage")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MealSlot {
            id: self.id,
            name: self.name,
            meal_type,
            days,
            member_ids: self.member_ids,
        })
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn get_template(&self) -> Result<Option<MealPlanTemplate>, AppError> {
        let template_id: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM meal_plan_templates WHERE household_id = $1")
                .bind(self.household_id)
                .fetch_optional(&self.db)
                .await?;
        let Some((template_id,)) = template_id else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, SlotRow>(
            r#"
            SELECT id, name, meal_type, days, member_ids
            FROM meal_slots
            WHERE template_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(template_id)
        .fetch_all(&self.db)
        .await?;

        let slots = rows
            .into_iter()
            .map(SlotRow::into_slot)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(MealPlanTemplate {
            id: template_id,
            slots,
        }))
    }

    async fn save_template(&self, template: &MealPlanTemplate) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        // Cascade removes the previous template's slots.
        sqlx::query("DELETE FROM meal_plan_templates WHERE household_id = $1")
            .bind(self.household_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO meal_plan_templates (id, household_id) VALUES ($1, $2)")
            .bind(template.id)
            .bind(self.household_id)
            .execute(&mut *tx)
            .await?;

        for (position, slot) in template.slots.iter().enumerate() {
            let days: Vec<String> = slot.days.iter().map(|d| d.as_str().to_string()).collect();
            sqlx::query(
                r#"
                INSERT INTO meal_slots (id, template_id, name, meal_type, days, member_ids, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(slot.id)
            .bind(template.id)
            .bind(&slot.name)
            .bind(slot.meal_type.as_str())
            .bind(&days)
            .bind(&slot.member_ids)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
