//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{CharacterServiceImpl, MinigameService};
use crate::domain::value_objects::Catalog;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{StoreFactory, Stores};

/// Shared application state
pub struct AppState {
    pub character_service: CharacterServiceImpl,
    pub minigame_service: MinigameService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let catalog = config.load_catalog()?;
        tracing::info!("Minigame catalog loaded with {} entries", catalog.len());

        let stores = StoreFactory::create(&config.store).await?;
        Ok(Self::from_parts(config, catalog, stores))
    }

    /// Wire services over already constructed adapters
    pub fn from_parts(config: AppConfig, catalog: Catalog, stores: Stores) -> Self {
        let character_service =
            CharacterServiceImpl::new(stores.characters.clone(), stores.inventory);
        let minigame_service = MinigameService::new(Arc::new(catalog), stores.characters)
            .with_max_attempts(config.play_max_attempts);

        Self {
            character_service,
            minigame_service,
        }
    }
}
