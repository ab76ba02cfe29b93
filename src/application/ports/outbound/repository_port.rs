//! Repository ports - Interfaces for data persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use async_trait::async_trait;

use crate::domain::entities::Character;
use crate::domain::value_objects::{AccountId, CharacterId, ItemGrant};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// Another writer committed first; the stored version moved on
    #[error("Version conflict on character {id}: expected version {expected}")]
    Conflict { id: CharacterId, expected: u64 },
    #[error("Not found")]
    NotFound,
    /// The account already owns a character
    #[error("Already exists")]
    AlreadyExists,
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Character Repository Port
// =============================================================================

/// Repository port for Character aggregate operations
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Insert a new character. Fails if the account already owns one.
    async fn create(&self, character: &Character) -> Result<(), RepoError>;

    /// Load a character by ID
    async fn load(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;

    /// Load the character owned by an account
    async fn load_by_account(&self, account_id: AccountId) -> Result<Option<Character>, RepoError>;

    /// Write the full character and append `items` to its inventory if the
    /// stored version still equals `expected_version`. Both land or neither
    /// does. Returns the new version.
    async fn save(
        &self,
        character: &Character,
        expected_version: u64,
        items: &[ItemGrant],
    ) -> Result<u64, RepoError>;
}

// =============================================================================
// Inventory Port
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),
}

/// Read side of the item inventory. Items are written by
/// `CharacterRepositoryPort::save` together with the character.
#[async_trait]
pub trait InventoryPort: Send + Sync {
    /// All items granted to a character, oldest first
    async fn list_items(&self, character_id: CharacterId) -> Result<Vec<ItemGrant>, InventoryError>;
}
