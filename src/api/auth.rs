//! Mock login endpoints
//!
//! Login issues a demo user for any email address. No password is checked
//! and no session is created; clients keep the returned user themselves.

use crate::api::JsonBody;
use crate::domain::models::User;
use crate::error::{AppError, Result};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<User>> {
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::InvalidInput("이메일이 필요합니다.".to_string()))?;

    let user = User::demo(email, request.name.as_deref());
    state.storage.save_user(&user).await?;

    log::info!("Demo login for {} as {}", user.email, user.id);
    Ok(Json(user))
}

/// GET /api/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>> {
    state
        .storage
        .get_user(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User not found: {}", user_id)))
}
