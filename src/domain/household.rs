use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    /// Multiplier against 1 standard serving, e.g. 1.5, 1.0, 0.25.
    pub serving_size: f64,
}
