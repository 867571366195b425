pub mod manager;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use uuid::Uuid;

pub use manager::{DatabaseError, PgStore};
pub use memory::MemoryStore;
pub use models::{Game, GameChanges, NewGame, User};

/// Persistence for the game collection.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn list_games(&self) -> Result<Vec<Game>, DatabaseError>;

    /// Insert a game and return it with its store-assigned id.
    async fn insert_game(&self, game: NewGame) -> Result<Game, DatabaseError>;

    /// Apply `changes` to the game with `id`. `None` means nothing matched.
    async fn update_game(&self, id: Uuid, changes: GameChanges) -> Result<Option<Game>, DatabaseError>;

    /// Returns the number of deleted games (0 or 1).
    async fn delete_game(&self, id: Uuid) -> Result<u64, DatabaseError>;
}

/// Read-only access to accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive lookup.
    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError>;
}

/// Everything the HTTP layer needs from a backing store.
#[async_trait]
pub trait Store: GameStore + UserStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
