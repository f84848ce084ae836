use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{all_events, approve_event, pending_events, reject_event};
use crate::app_state::AppState;

pub fn approval_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(pending_events))
        .route("/events/all", get(all_events))
        .route("/events/{id}/approve", post(approve_event))
        .route("/events/{id}/reject", post(reject_event))
}
