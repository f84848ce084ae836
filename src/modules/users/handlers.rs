use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::db::{NewUser, User, UserRepository, UserRole};
use crate::error::AppResult;

/// Account creation. Credential handling (passwords, tokens, sessions)
/// belongs to the fronting auth service; this only records the account.
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let now = OffsetDateTime::now_utc();
    let user = User {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email.to_lowercase(),
        role: payload.role,
        society_name: payload.society_name,
        favorite_categories: payload.favorite_categories,
        xp: 0,
        badges: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let mut col = state.store.write();
    UserRepository::insert(&mut col, user.clone())?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Account created successfully.",
            "user": user,
        })),
    ))
}

pub async fn list_users(
    State(state): State<AppState>,
    actor: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(UserRole::SuperAdmin)?;

    let col = state.store.read();
    let mut users: Vec<_> = col.users.values().cloned().collect();
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    Ok(Json(json!({
        "success": true,
        "count": users.len(),
        "users": users,
    })))
}
