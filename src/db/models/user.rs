use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use super::event::EventCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    SocietyAdmin,
    SuperAdmin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserRole::Student => "STUDENT",
            UserRole::SocietyAdmin => "SOCIETY_ADMIN",
            UserRole::SuperAdmin => "SUPER_ADMIN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    // Only applicable for the SOCIETY_ADMIN role
    pub society_name: Option<String>,
    // STUDENT only; drives personalized recommendations
    pub favorite_categories: Vec<EventCategory>,
    /// XP accumulation for the STUDENT role; mutated only by the reward
    /// engine and never decreases.
    pub xp: u32,
    pub badges: Vec<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub society_name: Option<String>,
    #[serde(default)]
    pub favorite_categories: Vec<EventCategory>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub favorite_categories: Option<Vec<EventCategory>>,
}
