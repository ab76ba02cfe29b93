//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP layer can
//! serialize/deserialize without shaping the domain model around JSON.

pub mod character;
pub mod minigame;

pub use character::*;
pub use minigame::*;
