// Handlers reachable without a token.

pub mod auth;
pub mod health;

pub use health::health;
