use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Game, GameChanges, NewGame, User};
use super::{DatabaseError, GameStore, Store, UserStore};

/// In-process store with the same semantics as [`super::PgStore`].
///
/// Games are kept in insertion order, so listings are stable.
#[derive(Clone, Default)]
pub struct MemoryStore {
    games: Arc<RwLock<Vec<Game>>>,
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. `user.password` must already be a PHC string.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.username.clone(), user);
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn list_games(&self) -> Result<Vec<Game>, DatabaseError> {
        Ok(self.games.read().await.clone())
    }

    async fn insert_game(&self, game: NewGame) -> Result<Game, DatabaseError> {
        let created = Game {
            id: Uuid::new_v4(),
            title: game.title,
            genre: game.genre,
        };
        self.games.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_game(&self, id: Uuid, changes: GameChanges) -> Result<Option<Game>, DatabaseError> {
        let mut games = self.games.write().await;
        Ok(games.iter_mut().find(|g| g.id == id).map(|game| {
            game.apply(changes);
            game.clone()
        }))
    }

    async fn delete_game(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|g| g.id != id);
        Ok((before - games.len()) as u64)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
