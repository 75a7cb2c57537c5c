use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::household::HouseholdMember;

#[derive(Debug, Deserialize)]
pub struct MemberSchema {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub serving_size: f64,
}

impl From<MemberSchema> for HouseholdMember {
    fn from(s: MemberSchema) -> Self {
        HouseholdMember {
            id: s.id,
            name: s.name,
            emoji: s.emoji,
            serving_size: s.serving_size,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveMembersRequest {
    pub members: Vec<MemberSchema>,
}

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub members: Vec<HouseholdMember>,
}
