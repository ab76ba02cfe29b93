//! Domain entities - Core business objects with identity

mod character;

pub use character::{Character, MAX_FATIGUE};
