use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::db::{
    BookingRepository, BookingStatus, Collections, EventRepository, NewRoom, RoomBooking,
    RoomRepository, UpdateRoom, UserRole,
};
use crate::error::AppResult;
use crate::scheduling;
use crate::workflow::booking_lifecycle;

pub async fn list_rooms(State(state): State<AppState>) -> Json<serde_json::Value> {
    let col = state.store.read();
    let rooms: Vec<_> = RoomRepository::all_by_name(&col)
        .into_iter()
        .cloned()
        .collect();

    Json(json!({
        "success": true,
        "count": rooms.len(),
        "rooms": rooms,
    }))
}

pub async fn create_room(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<NewRoom>,
) -> AppResult<impl IntoResponse> {
    let room = booking_lifecycle::create_room(
        &state.store,
        &actor,
        payload,
        OffsetDateTime::now_utc(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Room created successfully.",
            "room": room,
        })),
    ))
}

pub async fn update_room(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<UpdateRoom>,
) -> AppResult<Json<serde_json::Value>> {
    let room = booking_lifecycle::update_room(
        &state.store,
        &actor,
        room_id,
        payload,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Room updated successfully.",
        "room": room,
    })))
}

pub async fn delete_room(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(room_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    booking_lifecycle::delete_room(&state.store, &actor, room_id, OffsetDateTime::now_utc())?;

    Ok(Json(json!({
        "success": true,
        "message": "Room deleted successfully.",
    })))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start_date_time: OffsetDateTime,
    pub end_date_time: OffsetDateTime,
}

pub async fn availability(
    State(state): State<AppState>,
    Query(window): Query<AvailabilityQuery>,
) -> Json<serde_json::Value> {
    let col = state.store.read();
    let rooms = scheduling::available_rooms(&col, window.start_date_time, window.end_date_time);

    Json(json!({
        "success": true,
        "count": rooms.len(),
        "rooms": rooms,
    }))
}

/// Booking rendered with the room and event it references, the way the
/// approval screens consume it.
fn booking_with_context(col: &Collections, booking: &RoomBooking) -> serde_json::Value {
    let room = RoomRepository::get(col, booking.room_id).map(|r| {
        json!({
            "id": r.id,
            "name": r.name,
            "location": r.location,
            "capacity": r.capacity,
            "resources": r.resources,
        })
    });
    let event = EventRepository::get(col, booking.event_id).map(|e| {
        json!({
            "id": e.id,
            "title": e.title,
            "start_date_time": e.start_date_time,
            "end_date_time": e.end_date_time,
        })
    });

    json!({
        "booking": booking,
        "room": room,
        "event": event,
    })
}

pub async fn my_bookings(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(UserRole::SocietyAdmin)?;

    let col = state.store.read();
    let bookings: Vec<_> = BookingRepository::by_requester(&col, actor.id)
        .into_iter()
        .map(|b| booking_with_context(&col, b))
        .collect();

    Ok(Json(json!({
        "success": true,
        "count": bookings.len(),
        "bookings": bookings,
    })))
}

pub async fn pending_bookings(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(UserRole::SuperAdmin)?;

    let col = state.store.read();
    let bookings: Vec<_> = BookingRepository::by_status(&col, BookingStatus::PendingApproval)
        .into_iter()
        .map(|b| booking_with_context(&col, b))
        .collect();

    Ok(Json(json!({
        "success": true,
        "count": bookings.len(),
        "bookings": bookings,
    })))
}

pub async fn approve_booking(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let booking = booking_lifecycle::approve_booking(
        &state.store,
        &actor,
        booking_id,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Room booking approved successfully.",
        "booking": booking,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RejectBookingRequest {
    pub remarks: String,
}

pub async fn reject_booking(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<RejectBookingRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let booking = booking_lifecycle::reject_booking(
        &state.store,
        &actor,
        booking_id,
        payload.remarks,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Room booking rejected successfully.",
        "booking": booking,
    })))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    booking_lifecycle::cancel_booking(
        &state.store,
        &actor,
        booking_id,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Booking cancelled successfully.",
    })))
}
