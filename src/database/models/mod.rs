pub mod game;
pub mod user;

pub use game::{Game, GameChanges, NewGame};
pub use user::User;
