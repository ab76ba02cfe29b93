//! Store factory - Creates character store and inventory adapters based on configuration
//!
//! Mirrors the queue backends: an in-memory variant for development and
//! tests, and SQLite for anything that should survive a restart.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::ports::outbound::{CharacterRepositoryPort, InventoryPort};
use crate::infrastructure::config::StoreConfig;
use crate::infrastructure::persistence::{
    InMemoryCharacterRepository, SqliteCharacterRepository, SqliteInventory,
};

/// Character store and the inventory view over the same backend
pub struct Stores {
    pub characters: Arc<dyn CharacterRepositoryPort>,
    pub inventory: Arc<dyn InventoryPort>,
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(config: &StoreConfig) -> Result<Stores> {
        match config.backend.as_str() {
            "memory" => {
                tracing::warn!("Using in-memory store; characters are lost on restart");
                let characters = InMemoryCharacterRepository::new();
                Ok(Stores {
                    inventory: Arc::new(characters.inventory()),
                    characters: Arc::new(characters),
                })
            }
            "sqlite" => {
                // Ensure data directory exists
                if let Some(parent) = std::path::Path::new(&config.sqlite_path).parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create store database directory")?;
                }

                let options = SqliteConnectOptions::new()
                    .filename(&config.sqlite_path)
                    .create_if_missing(true);
                let pool = SqlitePoolOptions::new()
                    .connect_with(options)
                    .await
                    .context("Failed to connect to SQLite store database")?;
                tracing::info!("Connected to SQLite store database: {}", config.sqlite_path);

                let characters = SqliteCharacterRepository::new(pool.clone())
                    .await
                    .context("Failed to initialize store tables")?;
                let inventory = SqliteInventory::new(pool);

                Ok(Stores {
                    characters: Arc::new(characters),
                    inventory: Arc::new(inventory),
                })
            }
            backend => anyhow::bail!("Unsupported store backend: {}", backend),
        }
    }
}
