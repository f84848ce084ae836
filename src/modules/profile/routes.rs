use axum::{Router, routing::get};

use super::handlers::{get_leaderboard, get_profile, highlights, stats_overview, update_profile};
use crate::app_state::AppState;

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(get_profile).put(update_profile))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/stats/overview", get(stats_overview))
        .route("/api/highlights", get(highlights))
}
