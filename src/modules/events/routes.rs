use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{
    book_room, cancel_registration, conclude_event, create_event, delete_event, event_bookings,
    get_event, list_events, register_for_event, update_event,
};
use crate::app_state::AppState;

pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event).get(list_events))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route(
            "/{id}/register",
            post(register_for_event).delete(cancel_registration),
        )
        .route("/{id}/conclude", post(conclude_event))
        .route("/{id}/book-room", post(book_room))
        .route("/{id}/bookings", get(event_bookings))
}
