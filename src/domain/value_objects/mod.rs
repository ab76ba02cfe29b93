//! Value objects - Immutable objects defined by their attributes

mod catalog;
mod ids;
mod minigame;
mod reward;

pub use catalog::{Catalog, CatalogError};
pub use ids::*;
pub use minigame::{MinigameDefinition, MinigameKind, UnknownMinigameKind};
pub use reward::{ItemGrant, ItemKind, RewardBundle};
