use axum::{Router, routing::post};

use super::handlers::{create_user, list_users};
use crate::app_state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user).get(list_users))
}
