use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
}

/// Body of `POST /api/games`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub title: String,
    pub genre: String,
}

/// Body of `PUT /api/games/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameChanges {
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl Game {
    pub fn apply(&mut self, changes: GameChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
    }
}
