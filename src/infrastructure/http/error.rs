//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::ErrorResponseDto;
use crate::application::services::{CharacterError, PlayError};
use crate::domain::value_objects::{AccountId, CharacterId};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Play(#[from] PlayError),

    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Play(e) => match e {
                PlayError::UnknownMinigame(_) => (StatusCode::NOT_FOUND, "UNKNOWN_MINIGAME"),
                PlayError::CharacterNotFound(_) => (StatusCode::NOT_FOUND, "CHARACTER_NOT_FOUND"),
                PlayError::InsufficientLevel { .. } => {
                    (StatusCode::BAD_REQUEST, "INSUFFICIENT_LEVEL")
                }
                PlayError::InsufficientGold { .. } => (StatusCode::BAD_REQUEST, "INSUFFICIENT_GOLD"),
                PlayError::PersistenceConflict { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_CONFLICT")
                }
                PlayError::PersistenceUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_UNAVAILABLE")
                }
            },
            ApiError::Character(e) => match e {
                CharacterError::NotFound(_) => (StatusCode::NOT_FOUND, "CHARACTER_NOT_FOUND"),
                CharacterError::Unavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_UNAVAILABLE")
                }
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }

        let body = ErrorResponseDto {
            error: self.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}

pub fn parse_character_id(raw: &str) -> Result<CharacterId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid character ID".to_string()))
}

pub fn parse_account_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid account ID".to_string()))
}
