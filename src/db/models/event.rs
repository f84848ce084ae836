use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
    Completed,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::PendingApproval => "PENDING_APPROVAL",
            EventStatus::Approved => "APPROVED",
            EventStatus::Rejected => "REJECTED",
            EventStatus::Completed => "COMPLETED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Technical,
    Cultural,
    Sports,
    Literary,
    Workshops,
    Other,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventCategory::Technical => "Technical",
            EventCategory::Cultural => "Cultural",
            EventCategory::Sports => "Sports",
            EventCategory::Literary => "Literary",
            EventCategory::Workshops => "Workshops",
            EventCategory::Other => "Other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prize {
    pub position: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One prize position assigned to one winner. Positions are free text
/// ("1st Place", "Runner-up"); uniqueness is enforced where the full list
/// is assembled at conclude time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerAssignment {
    pub position: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub society_id: Uuid,
    // Denormalized for display
    pub society_name: String,
    pub category: EventCategory,
    pub description: String,
    pub start_date_time: OffsetDateTime,
    pub end_date_time: OffsetDateTime,
    pub status: EventStatus,
    pub approval_remarks: Option<String>,
    /// Reference to the uploaded proposal document; storage itself lives
    /// outside this service.
    pub proposal_url: Option<String>,
    pub max_participants: u32,
    pub registered_participants: Vec<Uuid>,
    pub prizes: Vec<Prize>,
    pub winners: Vec<WinnerAssignment>,
    pub room_id: Option<Uuid>,
    // Denormalized, optional
    pub room_name: Option<String>,
    pub created_by: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Event {
    pub fn is_registered(&self, user_id: Uuid) -> bool {
        self.registered_participants.contains(&user_id)
    }

    pub fn is_full(&self) -> bool {
        self.registered_participants.len() >= self.max_participants as usize
    }

    pub fn winner_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.winners.iter().map(|w| w.user_id)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewEvent {
    #[validate(length(min = 1, message = "Event title is required"))]
    pub title: String,
    pub category: EventCategory,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub start_date_time: OffsetDateTime,
    pub end_date_time: OffsetDateTime,
    #[validate(range(min = 1, message = "Maximum participants must be at least 1"))]
    pub max_participants: u32,
    #[serde(default)]
    pub prizes: Vec<Prize>,
    #[serde(default)]
    pub proposal_url: Option<String>,
    #[serde(default)]
    pub submit_for_approval: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "Event title must not be empty"))]
    pub title: Option<String>,
    pub category: Option<EventCategory>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    pub start_date_time: Option<OffsetDateTime>,
    pub end_date_time: Option<OffsetDateTime>,
    #[validate(range(min = 1, message = "Maximum participants must be at least 1"))]
    pub max_participants: Option<u32>,
    pub prizes: Option<Vec<Prize>>,
    pub proposal_url: Option<String>,
    #[serde(default)]
    pub submit_for_approval: bool,
}

/// Listing filters for `GET /api/events`.
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
    pub society_name: Option<String>,
    pub starts_after: Option<OffsetDateTime>,
    pub starts_before: Option<OffsetDateTime>,
    pub search: Option<String>,
}

/// Shape returned by the advisory event-clash check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub society_name: String,
    pub start_date_time: OffsetDateTime,
    pub end_date_time: OffsetDateTime,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        EventSummary {
            id: event.id,
            title: event.title.clone(),
            society_name: event.society_name.clone(),
            start_date_time: event.start_date_time,
            end_date_time: event.end_date_time,
        }
    }
}
