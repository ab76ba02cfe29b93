//! Minigame catalog - read-only lookup of minigame definitions

use std::collections::BTreeMap;

use super::minigame::{MinigameDefinition, MinigameKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown minigame: {0}")]
    NotFound(String),
}

/// The set of minigames offered by this deployment.
///
/// Built once at startup (defaults, optionally overridden by configuration)
/// and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    definitions: BTreeMap<MinigameKind, MinigameDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_definitions(MinigameKind::ALL.into_iter().map(MinigameDefinition::default_for))
    }
}

impl Catalog {
    /// Build a catalog from explicit definitions. Later duplicates replace earlier ones.
    pub fn from_definitions(definitions: impl IntoIterator<Item = MinigameDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    /// Look up a definition by its wire id
    pub fn definition_of(&self, minigame_id: &str) -> Result<&MinigameDefinition, CatalogError> {
        minigame_id
            .parse::<MinigameKind>()
            .ok()
            .and_then(|kind| self.definitions.get(&kind))
            .ok_or_else(|| CatalogError::NotFound(minigame_id.to_string()))
    }

    /// Definitions in catalog order
    pub fn definitions(&self) -> impl Iterator<Item = &MinigameDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
