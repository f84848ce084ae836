use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub resources: Vec<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewRoom {
    #[validate(length(min = 1, message = "Room name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: u32,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRoom {
    #[validate(length(min = 1, message = "Room name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Location must not be empty"))]
    pub location: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<u32>,
    pub resources: Option<Vec<String>>,
}
