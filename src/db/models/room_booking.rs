use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    PendingApproval,
    Confirmed,
    Cancelled,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomBooking {
    pub id: Uuid,
    pub event_id: Uuid,
    pub room_id: Uuid,
    pub booked_by: Uuid,
    /// Mirrors the event's interval at creation time.
    pub start_date_time: OffsetDateTime,
    pub end_date_time: OffsetDateTime,
    pub status: BookingStatus,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<OffsetDateTime>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<OffsetDateTime>,
    pub remarks: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct BookRoom {
    pub room_id: Uuid,
}

/// Shape returned by the blocking room-clash check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub id: Uuid,
    pub event_id: Uuid,
    pub event_title: Option<String>,
    pub start_date_time: OffsetDateTime,
    pub end_date_time: OffsetDateTime,
}

impl BookingSummary {
    pub fn new(booking: &RoomBooking, event_title: Option<String>) -> Self {
        BookingSummary {
            id: booking.id,
            event_id: booking.event_id,
            event_title,
            start_date_time: booking.start_date_time,
            end_date_time: booking.end_date_time,
        }
    }
}
