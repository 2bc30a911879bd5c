use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::members::domain::model::MemberEntity;
use crate::utils::date::serializer;

// MemberDto is the read-only view of a member handed to the presentation layer
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberDto {
    pub member_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(with = "serializer")]
    pub joined_on: NaiveDate,
}

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            name: other.name.to_string(),
            email: other.email.clone(),
            phone: other.phone.clone(),
            joined_on: other.joined_on,
        }
    }
}
