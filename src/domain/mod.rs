//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Character
//! - Value Objects: identifiers, minigame kinds, the catalog, reward bundles
//! - Domain Services: reward tables, the ledger, the battle contract

pub mod entities;
pub mod services;
pub mod value_objects;
