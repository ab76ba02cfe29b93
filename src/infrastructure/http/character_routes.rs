//! Character API routes

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::dto::{CharacterResponseDto, ItemListResponseDto};
use crate::application::services::CharacterService;
use crate::infrastructure::http::error::{parse_account_id, parse_character_id, ApiError};
use crate::infrastructure::state::AppState;

/// Get the account's character, registering it on first use
pub async fn get_or_create_character(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> Result<Json<CharacterResponseDto>, ApiError> {
    let account_id = parse_account_id(&account_id)?;
    let character = state
        .character_service
        .get_or_create_for_account(account_id)
        .await?;
    Ok(Json(CharacterResponseDto::from(character)))
}

/// Get a character by ID
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponseDto>, ApiError> {
    let id = parse_character_id(&id)?;
    let character = state.character_service.get_character(id).await?;
    Ok(Json(CharacterResponseDto::from(character)))
}

/// List items granted to a character
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ItemListResponseDto>, ApiError> {
    let id = parse_character_id(&id)?;
    let items = state.character_service.list_items(id).await?;
    Ok(Json(ItemListResponseDto { items }))
}
