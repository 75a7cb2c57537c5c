use serde::Deserialize;
use uuid::Uuid;

use crate::domain::meal_plan::{MealPlanTemplate, MealSlot, MealType, Weekday};

#[derive(Debug, Deserialize)]
pub struct SlotSchema {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub meal_type: MealType,
    pub days: Vec<Weekday>,
    pub member_ids: Vec<Uuid>,
}

impl From<SlotSchema> for MealSlot {
    fn from(s: SlotSchema) -> Self {
        MealSlot {
            id: s.id,
            name: s.name,
            meal_type: s.meal_type,
            days: s.days,
            member_ids: s.member_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TemplateSchema {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub slots: Vec<SlotSchema>,
}

impl From<TemplateSchema> for MealPlanTemplate {
    fn from(t: TemplateSchema) -> Self {
        MealPlanTemplate {
            id: t.id,
            slots: t.slots.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveTemplateRequest {
    pub template: TemplateSchema,
}
