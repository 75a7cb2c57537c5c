use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mon" => Some(Weekday::Mon),
            "tue" => Some(Weekday::Tue),
            "wed" => Some(Weekday::Wed),
            "thu" => Some(Weekday::Thu),
            "fri" => Some(Weekday::Fri),
            "sat" => Some(Weekday::Sat),
            "sun" => Some(Weekday::Sun),
            _ => None,
        }
    }
}

/// A recurring named meal occasion, e.g. "Weekday Dinners": which days it
/// covers and which household members eat it. Day order is preserved for
/// display only; the computations never depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSlot {
    pub id: Uuid,
    pub name: String,
    pub meal_type: MealType,
    pub days: Vec<Weekday>,
    pub member_ids: Vec<Uuid>,
}

impl MealSlot {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// A slot only makes sense with at least one member and one day.
    pub fn is_valid(&self) -> bool {
        !self.member_ids.is_empty() && !self.days.is_empty()
    }
}

/// The household's persistent set of slots. Exactly one live template per
/// household; saves replace the whole thing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanTemplate {
    pub id: Uuid,
    pub slots: Vec<MealSlot>,
}

impl MealPlanTemplate {
    pub fn is_valid(&self) -> bool {
        self.slots.iter().all(MealSlot::is_valid)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot_id: Uuid,
    pub recipe_id: Uuid,
}

/// One week's confirmed recipe-to-slot assignments. `week_start_date` is an
/// ISO date string ("2026-02-23") and is unique per household.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub id: Uuid,
    pub week_start_date: String,
    pub assignments: Vec<SlotAssignment>,
}
