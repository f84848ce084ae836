use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::db::{EventRepository, EventStatus, UserRole};
use crate::error::AppResult;
use crate::workflow::event_lifecycle;

pub async fn pending_events(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(UserRole::SuperAdmin)?;

    let col = state.store.read();
    let events: Vec<_> = EventRepository::by_status(&col, EventStatus::PendingApproval)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(json!({
        "success": true,
        "count": events.len(),
        "events": events,
    })))
}

pub async fn all_events(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(UserRole::SuperAdmin)?;

    let col = state.store.read();
    let events: Vec<_> = EventRepository::all(&col).into_iter().cloned().collect();

    Ok(Json(json!({
        "success": true,
        "count": events.len(),
        "events": events,
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct ApproveEventRequest {
    #[serde(default)]
    pub remarks: Option<String>,
}

pub async fn approve_event(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<ApproveEventRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let event = event_lifecycle::approve_event(
        &state.store,
        &actor,
        event_id,
        payload.remarks,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Event approved successfully.",
        "event": event,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RejectEventRequest {
    pub remarks: String,
}

pub async fn reject_event(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<RejectEventRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let event = event_lifecycle::reject_event(
        &state.store,
        &actor,
        event_id,
        payload.remarks,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Event rejected.",
        "event": event,
    })))
}
