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
    BookRoom, BookingRepository, EventFilter, EventRepository, NewEvent, RoomRepository,
    UpdateEvent, UserRepository, WinnerAssignment,
};
use crate::error::{AppError, AppResult};
use crate::workflow::{booking_lifecycle, event_lifecycle};

const CLASH_WARNING: &str = "This event has time clashes with existing events.";

pub async fn create_event(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<NewEvent>,
) -> AppResult<impl IntoResponse> {
    let outcome = event_lifecycle::create_event(
        &state.store,
        &actor,
        payload,
        OffsetDateTime::now_utc(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Event created successfully.",
            "event": outcome.event,
            "clashes": outcome.clashes,
            "warning": (!outcome.clashes.is_empty()).then_some(CLASH_WARNING),
        })),
    ))
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Json<serde_json::Value> {
    let col = state.store.read();
    let events: Vec<_> = EventRepository::search(&col, &filter)
        .into_iter()
        .cloned()
        .collect();

    Json(json!({
        "success": true,
        "count": events.len(),
        "events": events,
    }))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let col = state.store.read();
    let event = EventRepository::get(&col, event_id)
        .ok_or_else(|| AppError::NotFound("Event not found.".to_string()))?;

    let participants: Vec<_> = event
        .registered_participants
        .iter()
        .filter_map(|id| UserRepository::get(&col, *id))
        .map(|u| json!({ "id": u.id, "name": u.name, "email": u.email, "xp": u.xp }))
        .collect();
    let room = event.room_id.and_then(|id| RoomRepository::get(&col, id));

    Ok(Json(json!({
        "success": true,
        "event": event,
        "participants": participants,
        "room": room,
    })))
}

pub async fn update_event(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEvent>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = event_lifecycle::update_event(
        &state.store,
        &actor,
        event_id,
        payload,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Event updated successfully.",
        "event": outcome.event,
        "clashes": outcome.clashes,
        "warning": (!outcome.clashes.is_empty()).then_some(CLASH_WARNING),
    })))
}

pub async fn delete_event(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    event_lifecycle::delete_event(&state.store, &actor, event_id)?;

    Ok(Json(json!({
        "success": true,
        "message": "Event deleted successfully.",
    })))
}

pub async fn register_for_event(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = event_lifecycle::register(
        &state.store,
        &actor,
        event_id,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Successfully registered for event. +10 XP awarded!",
        "event": outcome.event,
        "user": {
            "id": outcome.student.id,
            "name": outcome.student.name,
            "email": outcome.student.email,
            "role": outcome.student.role,
            "xp": outcome.student.xp,
        },
    })))
}

pub async fn cancel_registration(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    event_lifecycle::cancel_registration(
        &state.store,
        &actor,
        event_id,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration cancelled successfully.",
    })))
}

#[derive(Debug, Deserialize)]
pub struct ConcludeRequest {
    #[serde(default)]
    pub winners: Vec<WinnerAssignment>,
}

pub async fn conclude_event(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<ConcludeRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let event = event_lifecycle::conclude_event(
        &state.store,
        &actor,
        event_id,
        payload.winners,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Event concluded successfully and XP awarded to participants.",
        "event": event,
    })))
}

pub async fn book_room(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<BookRoom>,
) -> AppResult<impl IntoResponse> {
    let booking = booking_lifecycle::book_room(
        &state.store,
        &actor,
        event_id,
        payload.room_id,
        OffsetDateTime::now_utc(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Room booked successfully.",
            "booking": booking,
        })),
    ))
}

pub async fn event_bookings(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Json<serde_json::Value> {
    let col = state.store.read();
    let bookings: Vec<_> = BookingRepository::by_event(&col, event_id)
        .into_iter()
        .cloned()
        .collect();

    Json(json!({
        "success": true,
        "count": bookings.len(),
        "bookings": bookings,
    }))
}
