use sqlx::FromRow;

pub const ADMIN_ROLE: &str = "admin";

/// Account record. Provisioned out of band; this service only reads it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    /// Argon2 PHC string.
    pub password: String,
    pub role: String,
}
