//! In-memory character store and inventory
//!
//! Used for local development (`STORE_BACKEND=memory`) and tests. Characters
//! and granted items share one tokio `RwLock`, so the version check, the
//! character write and the item append happen under a single write guard.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    CharacterRepositoryPort, InventoryError, InventoryPort, RepoError,
};
use crate::domain::entities::Character;
use crate::domain::value_objects::{AccountId, CharacterId, ItemGrant};

#[derive(Default)]
struct MemoryState {
    characters: HashMap<CharacterId, Character>,
    items: HashMap<CharacterId, Vec<ItemGrant>>,
}

#[derive(Clone, Default)]
pub struct InMemoryCharacterRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory view over this store's granted items
    pub fn inventory(&self) -> InMemoryInventory {
        InMemoryInventory {
            state: self.state.clone(),
        }
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let taken = state
            .characters
            .values()
            .any(|c| c.id == character.id || c.account_id == character.account_id);
        if taken {
            return Err(RepoError::AlreadyExists);
        }
        state.characters.insert(character.id, character.clone());
        Ok(())
    }

    async fn load(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.state.read().await.characters.get(&id).cloned())
    }

    async fn load_by_account(&self, account_id: AccountId) -> Result<Option<Character>, RepoError> {
        Ok(self
            .state
            .read()
            .await
            .characters
            .values()
            .find(|c| c.account_id == account_id)
            .cloned())
    }

    async fn save(
        &self,
        character: &Character,
        expected_version: u64,
        items: &[ItemGrant],
    ) -> Result<u64, RepoError> {
        let mut state = self.state.write().await;
        let stored = state
            .characters
            .get_mut(&character.id)
            .ok_or(RepoError::NotFound)?;
        if stored.version != expected_version {
            return Err(RepoError::Conflict {
                id: character.id,
                expected: expected_version,
            });
        }
        let version = expected_version + 1;
        *stored = Character {
            version,
            ..character.clone()
        };
        if !items.is_empty() {
            state
                .items
                .entry(character.id)
                .or_default()
                .extend_from_slice(items);
        }
        Ok(version)
    }
}

#[derive(Clone)]
pub struct InMemoryInventory {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait]
impl InventoryPort for InMemoryInventory {
    async fn list_items(&self, character_id: CharacterId) -> Result<Vec<ItemGrant>, InventoryError> {
        Ok(self
            .state
            .read()
            .await
            .items
            .get(&character_id)
            .cloned()
            .unwrap_or_default())
    }
}
