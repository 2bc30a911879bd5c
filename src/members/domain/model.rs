use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// MemberEntity abstracts a registered library member who can borrow books.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberEntity {
    pub member_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(with = "serializer")]
    pub joined_on: NaiveDate,
}

impl MemberEntity {
    pub fn new(name: &str, email: Option<String>, phone: Option<String>, joined_on: NaiveDate) -> Self {
        Self {
            member_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email,
            phone,
            joined_on,
        }
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }
}
