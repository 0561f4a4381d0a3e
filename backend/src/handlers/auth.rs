//! Authentication handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::CurrentIdentity;
use crate::services::auth::AuthTokens;
use crate::services::AuthService;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthTokens>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let tokens = auth_service.login(&body.email, &body.password).await?;
    Ok(Json(tokens))
}

/// Refresh token endpoint handler
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<AuthTokens>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let tokens = auth_service.refresh_token(&body.refresh_token).await?;
    Ok(Json(tokens))
}

/// Current identity: id, display identity, role memberships
pub async fn me(current_user: CurrentUser) -> Json<CurrentIdentity> {
    Json(current_user.0.identity())
}
