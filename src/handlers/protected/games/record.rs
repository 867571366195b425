use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::database::{Game, GameChanges};
use crate::error::ApiError;
use crate::state::AppState;

/// Ids that do not parse can never match a stored game, so they share the not-found path.
fn parse_game_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::game_not_found())
}

/// PUT /api/games/:id - Update a game's title and/or genre
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<GameChanges>,
) -> Result<Json<Game>, ApiError> {
    let id = parse_game_id(&id)?;

    // The update itself reports whether anything matched
    let game = state
        .store
        .update_game(id, payload)
        .await?
        .ok_or_else(ApiError::game_not_found)?;

    Ok(Json(game))
}

/// DELETE /api/games/:id - Delete a game
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    let id = parse_game_id(&id)?;

    if state.store.delete_game(id).await? == 0 {
        return Err(ApiError::game_not_found());
    }

    Ok("Game deleted")
}
