//! Minigame API routes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    MinigameListResponseDto, PlayMinigameRequestDto, PlayMinigameResponseDto,
};
use crate::infrastructure::http::error::{parse_character_id, ApiError};
use crate::infrastructure::state::AppState;

/// List the catalog with the character's fatigue and gold
pub async fn list_minigames(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MinigameListResponseDto>, ApiError> {
    let id = parse_character_id(&id)?;
    let listing = state.minigame_service.list_available_minigames(id).await?;
    Ok(Json(MinigameListResponseDto::from(listing)))
}

/// Play one minigame
pub async fn play_minigame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PlayMinigameRequestDto>, JsonRejection>,
) -> Result<Json<PlayMinigameResponseDto>, ApiError> {
    let id = parse_character_id(&id)?;
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let outcome = state
        .minigame_service
        .play_minigame(id, &req.game_type)
        .await?;
    Ok(Json(PlayMinigameResponseDto::from(outcome)))
}
