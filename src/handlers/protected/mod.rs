// Handlers behind jwt_auth_middleware. Every request here carries an Identity.

pub mod games;
