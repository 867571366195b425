use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Identity, ADMIN_ROLE};
use crate::error::ApiError;
use crate::state::AppState;

/// JWT authentication middleware that verifies the token and attaches the caller's identity
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = auth::authenticate(request.headers(), &state.keys)?;

    tracing::debug!("Authenticated '{}' ({})", identity.username, identity.role);
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Restricts a route to admins. Must run inside [`jwt_auth_middleware`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    auth::authorize(identity, ADMIN_ROLE)?;

    Ok(next.run(request).await)
}
