pub mod password;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::database::{DatabaseError, UserStore};

pub use crate::database::models::user::ADMIN_ROLE;
pub use password::{hash_password, verify_password};

/// Outcomes of the credential gate
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token on the request
    #[error("Unauthorized")]
    Unauthenticated,

    /// Token failed verification, or the role is insufficient
    #[error("Forbidden")]
    Forbidden,

    /// Unknown user or wrong password; deliberately indistinguishable
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("JWT generation error: {0}")]
    TokenGeneration(#[from] jsonwebtoken::errors::Error),

    #[error("Password verification task failed: {0}")]
    PasswordTask(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Token payload. Carries no `exp`: issued tokens do not expire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            iat: Some(Utc::now().timestamp()),
        }
    }
}

/// Authenticated caller, attached to the request by the JWT middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: String,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            role: claims.role,
        }
    }
}

/// HS256 signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    /// Verify the signature and decode the claims.
    ///
    /// `exp` is not required; a token that carries one is still checked against it.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Forbidden)
    }
}

/// Pull the token out of the `authorization` header.
///
/// Accepts the bare token as well as `Bearer <token>`. A missing or blank
/// header is `Unauthenticated`; a header that is not valid text is `Forbidden`.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::Unauthenticated)?
        .to_str()
        .map_err(|_| AuthError::Forbidden)?
        .trim();

    // Header values arrive with trailing whitespace stripped, so `Bearer ` may be just `Bearer`
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value,
    };
    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }
    Ok(token)
}

/// Verify the request's token and derive the caller's identity.
pub fn authenticate(headers: &HeaderMap, keys: &JwtKeys) -> Result<Identity, AuthError> {
    let token = extract_token(headers)?;
    keys.verify(token).map(Identity::from)
}

/// Require `identity` to hold `required_role`.
pub fn authorize(identity: &Identity, required_role: &str) -> Result<(), AuthError> {
    if identity.role != required_role {
        return Err(AuthError::Forbidden);
    }
    Ok(())
}

/// Check credentials and issue a token encoding the user's name and role.
pub async fn login<U: UserStore + ?Sized>(
    users: &U,
    keys: &JwtKeys,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let Some(user) = users.find_user(username).await? else {
        warn!("Login rejected for '{}'", username);
        return Err(AuthError::InvalidCredentials);
    };

    // Argon2 is deliberately slow; keep it off the async workers
    let candidate = password.to_string();
    let stored = user.password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored)).await?;

    if !matches {
        warn!("Login rejected for '{}'", username);
        return Err(AuthError::InvalidCredentials);
    }

    keys.sign(&Claims::new(user.username, user.role))
}
