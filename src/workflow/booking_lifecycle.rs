use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::db::{
    BookingRepository, BookingStatus, Collections, EventRepository, NewRoom, Room,
    RoomBooking, RoomRepository, Store, UpdateRoom, UserRole,
};
use crate::error::{AppError, AppResult};
use crate::scheduling::find_room_clashes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Approve,
    Reject,
    Cancel,
}

impl BookingStatus {
    pub fn transition(self, action: BookingAction) -> Result<BookingStatus, AppError> {
        match (self, action) {
            (BookingStatus::PendingApproval, BookingAction::Approve) => Ok(BookingStatus::Confirmed),
            (BookingStatus::PendingApproval, BookingAction::Reject) => Ok(BookingStatus::Rejected),
            (
                BookingStatus::PendingApproval | BookingStatus::Confirmed,
                BookingAction::Cancel,
            ) => Ok(BookingStatus::Cancelled),
            _ => Err(AppError::AlreadyProcessed(
                "This booking has already been processed.".to_string(),
            )),
        }
    }
}

fn clear_event_room(col: &mut Collections, event_id: Uuid, now: OffsetDateTime) {
    if let Some(event) = EventRepository::get_mut(col, event_id) {
        event.room_id = None;
        event.room_name = None;
        event.updated_at = now;
    }
}

/// Books a room for an event the actor owns. The blocking clash check and
/// the booking insert run under one exclusive guard, so two requests for
/// the same window cannot both pass the check.
pub fn book_room(
    store: &Store,
    actor: &AuthUser,
    event_id: Uuid,
    room_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<RoomBooking> {
    actor.require_role(UserRole::SocietyAdmin)?;

    let mut col = store.write();

    let event = EventRepository::get(&col, event_id)
        .ok_or_else(|| AppError::NotFound("Event not found.".to_string()))?;
    if event.created_by != actor.id {
        return Err(AppError::Authorization(
            "You do not have permission to book a room for this event.".to_string(),
        ));
    }
    let (start, end) = (event.start_date_time, event.end_date_time);

    let room = RoomRepository::get(&col, room_id)
        .ok_or_else(|| AppError::NotFound("Room not found.".to_string()))?;
    let room_name = room.name.clone();

    if !find_room_clashes(&col, room_id, start, end, None).is_empty() {
        return Err(AppError::Conflict(
            "Room is not available for the selected time slot.".to_string(),
        ));
    }

    let booking = RoomBooking {
        id: Uuid::new_v4(),
        event_id,
        room_id,
        booked_by: actor.id,
        start_date_time: start,
        end_date_time: end,
        status: BookingStatus::PendingApproval,
        approved_by: None,
        approved_at: None,
        rejected_by: None,
        rejected_at: None,
        remarks: None,
        created_at: now,
        updated_at: now,
    };
    BookingRepository::insert(&mut col, booking.clone());

    if let Some(event) = EventRepository::get_mut(&mut col, event_id) {
        event.room_id = Some(room_id);
        event.room_name = Some(room_name);
        event.updated_at = now;
    }

    Ok(booking)
}

/// Confirms a pending booking. The clash check is re-run here: two
/// overlapping bookings can both be PENDING legitimately, and confirming
/// the second must fail once the first is CONFIRMED, or the room's
/// non-overlap invariant breaks.
pub fn approve_booking(
    store: &Store,
    actor: &AuthUser,
    booking_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<RoomBooking> {
    actor.require_role(UserRole::SuperAdmin)?;

    let mut col = store.write();

    let booking = BookingRepository::get(&col, booking_id)
        .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;
    let next = booking.status.transition(BookingAction::Approve)?;
    let (room_id, start, end) = (
        booking.room_id,
        booking.start_date_time,
        booking.end_date_time,
    );

    if !find_room_clashes(&col, room_id, start, end, Some(booking_id)).is_empty() {
        return Err(AppError::Conflict(
            "Room is no longer available for the requested time slot.".to_string(),
        ));
    }

    let booking = BookingRepository::get_mut(&mut col, booking_id)
        .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;
    booking.status = next;
    booking.approved_by = Some(actor.id);
    booking.approved_at = Some(now);
    booking.updated_at = now;

    Ok(booking.clone())
}

pub fn reject_booking(
    store: &Store,
    actor: &AuthUser,
    booking_id: Uuid,
    remarks: String,
    now: OffsetDateTime,
) -> AppResult<RoomBooking> {
    actor.require_role(UserRole::SuperAdmin)?;
    if remarks.trim().is_empty() {
        return Err(AppError::Validation(
            "Rejection remarks are required.".to_string(),
        ));
    }

    let mut col = store.write();

    let booking = BookingRepository::get_mut(&mut col, booking_id)
        .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;
    booking.status = booking.status.transition(BookingAction::Reject)?;
    booking.rejected_by = Some(actor.id);
    booking.rejected_at = Some(now);
    booking.remarks = Some(remarks);
    booking.updated_at = now;
    let booking = booking.clone();

    clear_event_room(&mut col, booking.event_id, now);

    Ok(booking)
}

pub fn cancel_booking(
    store: &Store,
    actor: &AuthUser,
    booking_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<RoomBooking> {
    let mut col = store.write();

    let booking = BookingRepository::get_mut(&mut col, booking_id)
        .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;
    if booking.booked_by != actor.id {
        return Err(AppError::Authorization(
            "You do not have permission to cancel this booking.".to_string(),
        ));
    }
    booking.status = booking.status.transition(BookingAction::Cancel)?;
    booking.updated_at = now;
    let booking = booking.clone();

    clear_event_room(&mut col, booking.event_id, now);

    Ok(booking)
}

pub fn create_room(
    store: &Store,
    actor: &AuthUser,
    payload: NewRoom,
    now: OffsetDateTime,
) -> AppResult<Room> {
    actor.require_role(UserRole::SuperAdmin)?;
    payload.validate()?;

    let room = Room {
        id: Uuid::new_v4(),
        name: payload.name,
        location: payload.location,
        capacity: payload.capacity,
        resources: payload.resources,
        created_at: now,
        updated_at: now,
    };

    let mut col = store.write();
    RoomRepository::insert(&mut col, room.clone())?;
    Ok(room)
}

pub fn update_room(
    store: &Store,
    actor: &AuthUser,
    room_id: Uuid,
    payload: UpdateRoom,
    now: OffsetDateTime,
) -> AppResult<Room> {
    actor.require_role(UserRole::SuperAdmin)?;
    payload.validate()?;

    let mut col = store.write();

    if let Some(name) = payload.name.as_deref()
        && RoomRepository::name_taken(&col, name, Some(room_id))
    {
        return Err(AppError::Conflict(format!(
            "A room named '{name}' already exists."
        )));
    }

    let room = RoomRepository::get_mut(&mut col, room_id)
        .ok_or_else(|| AppError::NotFound("Room not found.".to_string()))?;

    if let Some(name) = payload.name {
        room.name = name;
    }
    if let Some(location) = payload.location {
        room.location = location;
    }
    if let Some(capacity) = payload.capacity {
        room.capacity = capacity;
    }
    if let Some(resources) = payload.resources {
        room.resources = resources;
    }
    room.updated_at = now;

    Ok(room.clone())
}

/// Deletion is blocked while the room has CONFIRMED bookings that have not
/// ended yet.
pub fn delete_room(
    store: &Store,
    actor: &AuthUser,
    room_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<()> {
    actor.require_role(UserRole::SuperAdmin)?;

    let mut col = store.write();

    if RoomRepository::get(&col, room_id).is_none() {
        return Err(AppError::NotFound("Room not found.".to_string()));
    }
    if BookingRepository::has_active_confirmed(&col, room_id, now) {
        return Err(AppError::Conflict(
            "Cannot delete room with active bookings.".to_string(),
        ));
    }

    RoomRepository::remove(&mut col, room_id);
    Ok(())
}
