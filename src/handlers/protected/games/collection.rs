use axum::{
    extract::{Extension, State},
    Json,
};

use crate::auth::Identity;
use crate::database::{Game, NewGame};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/games - List every game, unfiltered
pub async fn get(State(state): State<AppState>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.store.list_games().await?;
    Ok(Json(games))
}

/// POST /api/games - Create a game (admin only)
///
/// The route is wrapped in `require_admin`, so the caller is already known to be an admin here.
pub async fn post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<NewGame>,
) -> Result<Json<Game>, ApiError> {
    let game = state.store.insert_game(payload).await?;

    tracing::info!("'{}' created game {}", identity.username, game.id);
    Ok(Json(game))
}
