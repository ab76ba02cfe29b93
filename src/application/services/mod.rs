//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles, accepting port
//! dependencies and returning domain values or service-level results.

pub mod character_service;
pub mod minigame_service;

// Re-export character service types
pub use character_service::{CharacterError, CharacterService, CharacterServiceImpl};

// Re-export minigame service types
pub use minigame_service::{
    AvailableMinigames, MinigameService, PlayError, PlayOutcome, DEFAULT_MAX_ATTEMPTS,
};
