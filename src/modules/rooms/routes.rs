use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers::{
    approve_booking, availability, cancel_booking, create_room, delete_room, list_rooms,
    my_bookings, pending_bookings, reject_booking, update_room,
};
use crate::app_state::AppState;

pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/availability", get(availability))
        .route("/bookings/my-bookings", get(my_bookings))
        .route("/bookings/pending", get(pending_bookings))
        .route("/bookings/{id}/approve", post(approve_booking))
        .route("/bookings/{id}/reject", post(reject_booking))
        .route("/bookings/{id}", delete(cancel_booking))
        .route("/{id}", put(update_room).delete(delete_room))
}
