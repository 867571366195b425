use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login - Exchange username and password for a signed token
///
/// Unknown users and wrong passwords get the same 401 response.
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = auth::login(
        state.store.as_ref(),
        &state.keys,
        &payload.username,
        &payload.password,
    )
    .await?;

    tracing::info!("Issued token for '{}'", payload.username);
    Ok(Json(LoginResponse { token }))
}
