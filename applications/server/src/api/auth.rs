/// Authentication API routes
use crate::{
    api::extract::Payload,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use lyrics_core::UserRepository;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

fn invalid_credentials() -> ServerError {
    ServerError::Auth("Invalid username or password".to_string())
}

/// POST /auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Payload(req): Payload<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (user_id, password_hash) = app_state
        .db
        .find_credentials(&req.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(invalid_credentials());
    }

    let access_token = app_state.auth_service.create_access_token(user_id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(user_id)?;

    tracing::info!(user_id, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Payload(req): Payload<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let access_token = app_state.auth_service.create_access_token(user_id)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
