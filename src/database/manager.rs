use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::models::{Game, GameChanges, NewGame, User};
use super::{GameStore, Store, UserStore};
use crate::config::DatabaseConfig;

/// Errors from the backing store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Postgres-backed store sharing a single connection pool across requests
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool. Called once at startup; failure is fatal to the process.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await?;

        info!("Connected to database");
        Ok(Self { pool })
    }

    /// Create the `users` and `games` tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password TEXT NOT NULL,
                role     TEXT NOT NULL DEFAULT 'user'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id    UUID PRIMARY KEY,
                title TEXT NOT NULL,
                genre TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl GameStore for PgStore {
    async fn list_games(&self) -> Result<Vec<Game>, DatabaseError> {
        let games = sqlx::query_as::<_, Game>("SELECT id, title, genre FROM games")
            .fetch_all(&self.pool)
            .await?;
        Ok(games)
    }

    async fn insert_game(&self, game: NewGame) -> Result<Game, DatabaseError> {
        let created = sqlx::query_as::<_, Game>(
            "INSERT INTO games (id, title, genre) VALUES ($1, $2, $3) RETURNING id, title, genre",
        )
        .bind(Uuid::new_v4())
        .bind(&game.title)
        .bind(&game.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_game(&self, id: Uuid, changes: GameChanges) -> Result<Option<Game>, DatabaseError> {
        let updated = sqlx::query_as::<_, Game>(
            r#"
            UPDATE games
               SET title = COALESCE($2, title),
                   genre = COALESCE($3, genre)
             WHERE id = $1
            RETURNING id, title, genre
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.genre)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_game(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
