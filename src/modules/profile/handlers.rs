use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::db::{
    Event, EventCategory, EventRepository, EventStatus, UpdateProfile, UserRepository, UserRole,
};
use crate::error::{AppError, AppResult};
use crate::rewards;
use crate::workflow::event_lifecycle;

const HIGHLIGHTS_LIMIT: usize = 10;

fn event_brief(event: &Event) -> serde_json::Value {
    json!({
        "id": event.id,
        "title": event.title,
        "category": event.category,
        "status": event.status,
        "start_date_time": event.start_date_time,
        "end_date_time": event.end_date_time,
    })
}

pub async fn get_profile(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let col = state.store.read();
    let user = UserRepository::get(&col, actor.id)
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    let mut body = json!({
        "success": true,
        "user": user,
    });

    match user.role {
        UserRole::Student => {
            let registered = EventRepository::by_participant(&col, user.id);
            body["registered_events"] =
                json!(registered.iter().map(|e| event_brief(e)).collect::<Vec<_>>());
            body["total_events"] = json!(registered.len());
            body["rank"] = json!(rewards::user_rank(&col, user.id));
        }
        UserRole::SocietyAdmin => {
            let own = EventRepository::by_creator(&col, user.id);
            body["society_events"] =
                json!(own.iter().map(|e| event_brief(e)).collect::<Vec<_>>());
            body["total_events"] = json!(own.len());
        }
        UserRole::SuperAdmin => {}
    }

    Ok(Json(body))
}

pub async fn update_profile(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(payload): Json<UpdateProfile>,
) -> AppResult<Json<serde_json::Value>> {
    payload.validate()?;

    let mut col = state.store.write();
    let user = UserRepository::get_mut(&mut col, actor.id)
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    if let Some(name) = payload.name {
        user.name = name;
    }
    // Favorite categories only mean something for students
    if let Some(categories) = payload.favorite_categories
        && user.role == UserRole::Student
    {
        user.favorite_categories = categories;
    }
    user.updated_at = OffsetDateTime::now_utc();
    let user = user.clone();

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully.",
        "user": user,
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<serde_json::Value> {
    let limit = query.limit.unwrap_or(state.env.app.leaderboard_limit);
    let col = state.store.read();
    let leaderboard = rewards::leaderboard(&col, limit);

    Json(json!({
        "success": true,
        "leaderboard": leaderboard,
    }))
}

pub async fn stats_overview(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(UserRole::SuperAdmin)?;

    let now = OffsetDateTime::now_utc();
    let col = state.store.read();

    let mut by_category: HashMap<EventCategory, usize> = HashMap::new();
    let mut by_society: HashMap<&str, usize> = HashMap::new();
    for event in col.events.values() {
        *by_category.entry(event.category).or_default() += 1;
        *by_society.entry(event.society_name.as_str()).or_default() += 1;
    }
    let mut events_by_category: Vec<_> = by_category.into_iter().collect();
    events_by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_string().cmp(&b.0.to_string())));
    let mut events_by_society: Vec<_> = by_society.into_iter().collect();
    events_by_society.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    events_by_society.truncate(10);

    let mut upcoming: Vec<&Event> = col
        .events
        .values()
        .filter(|e| e.status == EventStatus::Approved && e.start_date_time >= now)
        .collect();
    upcoming.sort_by_key(|e| (e.start_date_time, e.id));
    let upcoming: Vec<_> = upcoming.into_iter().take(5).map(event_brief).collect();

    Ok(Json(json!({
        "success": true,
        "stats": {
            "total_events": col.events.len(),
            "pending_approvals": EventRepository::count_by_status(&col, EventStatus::PendingApproval),
            "approved_events": EventRepository::count_by_status(&col, EventStatus::Approved),
            "completed_events": EventRepository::count_by_status(&col, EventStatus::Completed),
            "total_students": UserRepository::count_by_role(&col, UserRole::Student),
            "total_societies": UserRepository::count_by_role(&col, UserRole::SocietyAdmin),
            "events_by_category": events_by_category
                .iter()
                .map(|(category, count)| json!({ "category": category, "count": count }))
                .collect::<Vec<_>>(),
            "events_by_society": events_by_society
                .iter()
                .map(|(society, count)| json!({ "society": society, "count": count }))
                .collect::<Vec<_>>(),
            "upcoming_events": upcoming,
        },
    })))
}

pub async fn highlights(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(UserRole::Student)?;

    let col = state.store.read();
    let user = UserRepository::get(&col, actor.id)
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    let highlights = event_lifecycle::highlights_for_student(
        &col,
        user,
        OffsetDateTime::now_utc(),
        HIGHLIGHTS_LIMIT,
    );

    Ok(Json(json!({
        "success": true,
        "highlights": highlights,
    })))
}
