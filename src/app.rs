use axum::{Json, Router, extract::State, middleware, routing::get};
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        approvals::routes::approval_routes, events::routes::event_routes,
        profile::routes::profile_routes, rooms::routes::room_routes, users::routes::user_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/api/events", event_routes())
        .nest("/api/rooms", room_routes())
        .nest("/api/approvals", approval_routes())
        .nest("/api/users", user_routes())
        .merge(profile_routes())
        .layer(middleware::from_fn(observability_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Campus Events Backend says hello!\n"
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (events, rooms, bookings, users) = {
        let col = state.store.read();
        (
            col.events.len(),
            col.rooms.len(),
            col.bookings.len(),
            col.users.len(),
        )
    };

    Json(json!({
        "status": "ok",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        "version": env!("CARGO_PKG_VERSION"),
        "store": {
            "events": events,
            "rooms": rooms,
            "bookings": bookings,
            "users": users,
        },
    }))
}
