// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse};

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// HTTP API error with its status code and a plain-text, client-safe message
#[derive(Debug)]
pub enum ApiError {
    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn game_not_found() -> Self {
        ApiError::not_found("Game not found")
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => ApiError::unauthorized("Unauthorized"),
            AuthError::Forbidden => ApiError::forbidden("Forbidden"),
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid username or password"),
            AuthError::Database(db_err) => db_err.into(),
            other => {
                tracing::error!("Authentication failure: {}", other);
                ApiError::internal_server_error("Internal Server Error")
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Database error: {}", err);
        ApiError::internal_server_error("Internal Server Error")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg) => (status, msg).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn auth_errors_map_to_gate_statuses() {
        assert_eq!(
            body_text(AuthError::Unauthenticated.into()).await,
            (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
        );
        assert_eq!(
            body_text(AuthError::Forbidden.into()).await,
            (StatusCode::FORBIDDEN, "Forbidden".to_string())
        );
        assert_eq!(
            body_text(AuthError::InvalidCredentials.into()).await,
            (StatusCode::UNAUTHORIZED, "Invalid username or password".to_string())
        );
    }

    #[tokio::test]
    async fn not_found_is_plain_text() {
        let response = ApiError::game_not_found().into_response();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        assert_eq!(
            body_text(ApiError::game_not_found()).await,
            (StatusCode::NOT_FOUND, "Game not found".to_string())
        );
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_details() {
        let err: ApiError = DatabaseError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert_eq!(
            body_text(err).await,
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
        );
    }
}
