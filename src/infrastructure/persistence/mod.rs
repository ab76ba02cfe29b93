//! Persistence adapters
//!
//! Implementations of the character store and inventory ports, plus the
//! factory that picks one from configuration.

mod factory;
mod memory_repository;
mod sqlite_repository;

pub use factory::{StoreFactory, Stores};
pub use memory_repository::{InMemoryCharacterRepository, InMemoryInventory};
pub use sqlite_repository::{SqliteCharacterRepository, SqliteInventory};
