//! Character Service - Application service for character management
//!
//! This service provides use case implementations for registering a
//! character for an account, reading its state and listing its items.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

use crate::application::ports::outbound::{CharacterRepositoryPort, InventoryPort, RepoError};
use crate::domain::entities::Character;
use crate::domain::value_objects::{AccountId, CharacterId, ItemGrant};

/// Errors returned by character use cases
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    #[error("Character store unavailable: {0}")]
    Unavailable(String),
}

impl From<RepoError> for CharacterError {
    fn from(e: RepoError) -> Self {
        error!(error = %e, "Character store failure");
        Self::Unavailable(e.to_string())
    }
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Return the account's character, registering one with starting values if absent
    async fn get_or_create_for_account(&self, account_id: AccountId) -> Result<Character, CharacterError>;

    /// Get a character by ID
    async fn get_character(&self, id: CharacterId) -> Result<Character, CharacterError>;

    /// Items granted to a character so far
    async fn list_items(&self, id: CharacterId) -> Result<Vec<ItemGrant>, CharacterError>;
}

/// Default implementation of CharacterService over the outbound ports
pub struct CharacterServiceImpl {
    characters: Arc<dyn CharacterRepositoryPort>,
    inventory: Arc<dyn InventoryPort>,
}

impl CharacterServiceImpl {
    pub fn new(
        characters: Arc<dyn CharacterRepositoryPort>,
        inventory: Arc<dyn InventoryPort>,
    ) -> Self {
        Self {
            characters,
            inventory,
        }
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self), fields(account_id = %account_id))]
    async fn get_or_create_for_account(&self, account_id: AccountId) -> Result<Character, CharacterError> {
        if let Some(existing) = self.characters.load_by_account(account_id).await? {
            debug!(character_id = %existing.id, "Account already has a character");
            return Ok(existing);
        }

        let character = Character::new(account_id);
        match self.characters.create(&character).await {
            Ok(()) => {
                info!(character_id = %character.id, "Registered new character");
                Ok(character)
            }
            // Lost a registration race; the winner's character is the account's
            Err(RepoError::AlreadyExists) => self
                .characters
                .load_by_account(account_id)
                .await?
                .ok_or_else(|| CharacterError::Unavailable("Character vanished after create".into())),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_character(&self, id: CharacterId) -> Result<Character, CharacterError> {
        debug!(character_id = %id, "Fetching character");
        self.characters
            .load(id)
            .await?
            .ok_or(CharacterError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn list_items(&self, id: CharacterId) -> Result<Vec<ItemGrant>, CharacterError> {
        // 404 for unknown characters rather than an empty list
        self.get_character(id).await?;
        self.inventory.list_items(id).await.map_err(|e| {
            error!(error = %e, "Failed to list items");
            CharacterError::Unavailable(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryCharacterRepository;

    fn service() -> (CharacterServiceImpl, InMemoryCharacterRepository) {
        let characters = InMemoryCharacterRepository::new();
        let service = CharacterServiceImpl::new(
            Arc::new(characters.clone()),
            Arc::new(characters.inventory()),
        );
        (service, characters)
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent_per_account() {
        let (service, _) = service();
        let account = AccountId::new();

        let first = service.get_or_create_for_account(account).await.unwrap();
        let second = service.get_or_create_for_account(account).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.level, 1);
        assert_eq!(first.gold, 0);
        assert_eq!(first.fatigue, 0);

        let other = service
            .get_or_create_for_account(AccountId::new())
            .await
            .unwrap();
        assert_ne!(other.id, first.id);
    }

    #[tokio::test]
    async fn test_get_character_not_found() {
        let (service, _) = service();
        let id = CharacterId::new();
        assert_eq!(
            service.get_character(id).await,
            Err(CharacterError::NotFound(id))
        );
        assert_eq!(service.list_items(id).await, Err(CharacterError::NotFound(id)));
    }

    #[tokio::test]
    async fn test_list_items_reads_inventory() {
        let (service, characters) = service();
        let character = service
            .get_or_create_for_account(AccountId::new())
            .await
            .unwrap();
        characters
            .save(&character, character.version, &[ItemGrant::equipment(4)])
            .await
            .unwrap();

        assert_eq!(
            service.list_items(character.id).await.unwrap(),
            vec![ItemGrant::equipment(4)]
        );
    }
}
