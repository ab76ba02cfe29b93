//! Minigame Service - Coordinates a single minigame play
//!
//! A play is a read-validate-apply-write cycle against one character:
//! 1. Resolve the minigame in the catalog
//! 2. Load the character
//! 3. Check the level gate, then the gold gate
//! 4. Roll rewards and run the ledger transition
//! 5. Commit with an optimistic version check
//!
//! A version conflict means another request for the same character committed
//! first, so the whole cycle is repeated against freshly loaded state, up to
//! a fixed number of attempts. Reward items are written by the same commit as
//! the character, so a play is never half applied.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, instrument, warn};

use crate::application::ports::outbound::{CharacterRepositoryPort, RepoError};
use crate::domain::entities::Character;
use crate::domain::services::{generate_rewards, AppliedDelta, Ledger, LedgerError};
use crate::domain::value_objects::{
    Catalog, CatalogError, CharacterId, MinigameDefinition, MinigameKind, RewardBundle,
};

/// Default bound on commit attempts for one play
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Errors that can occur while playing a minigame
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("Unknown minigame: {0}")]
    UnknownMinigame(String),

    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Level {current} is below the required level {required}")]
    InsufficientLevel { required: u32, current: u32 },

    #[error("Not enough gold: {cost} required, {available} available")]
    InsufficientGold { cost: u64, available: u64 },

    #[error("Character was modified concurrently; gave up after {attempts} attempts")]
    PersistenceConflict { attempts: u32 },

    #[error("Character store unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl From<CatalogError> for PlayError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => Self::UnknownMinigame(id),
        }
    }
}

impl From<LedgerError> for PlayError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InsufficientLevel { required, current } => {
                Self::InsufficientLevel { required, current }
            }
            LedgerError::InsufficientGold { cost, available } => {
                Self::InsufficientGold { cost, available }
            }
        }
    }
}

/// Result of a committed play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub minigame: MinigameKind,
    pub rewards: RewardBundle,
    pub new_fatigue: u32,
    pub new_gold: u64,
    pub applied: AppliedDelta,
}

/// Catalog view for one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableMinigames {
    pub catalog: Vec<MinigameDefinition>,
    pub level: u32,
    pub fatigue: u32,
    pub gold: u64,
    pub play_counts: BTreeMap<MinigameKind, u64>,
}

pub struct MinigameService {
    catalog: Arc<Catalog>,
    characters: Arc<dyn CharacterRepositoryPort>,
    max_attempts: u32,
}

impl MinigameService {
    pub fn new(catalog: Arc<Catalog>, characters: Arc<dyn CharacterRepositoryPort>) -> Self {
        Self {
            catalog,
            characters,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The catalog together with the character's current resources
    #[instrument(skip(self), fields(character_id = %character_id))]
    pub async fn list_available_minigames(
        &self,
        character_id: CharacterId,
    ) -> Result<AvailableMinigames, PlayError> {
        let character = self.load_character(character_id).await?;
        debug!(level = character.level, gold = character.gold, "Listing minigames");

        Ok(AvailableMinigames {
            catalog: self.catalog.definitions().cloned().collect(),
            level: character.level,
            fatigue: character.fatigue,
            gold: character.gold,
            play_counts: character.minigame_play_counts,
        })
    }

    /// Play a minigame with a freshly seeded random source
    pub async fn play_minigame(
        &self,
        character_id: CharacterId,
        minigame_id: &str,
    ) -> Result<PlayOutcome, PlayError> {
        let mut rng = StdRng::from_entropy();
        self.play_minigame_with_rng(character_id, minigame_id, &mut rng)
            .await
    }

    /// Play a minigame drawing rewards from `rng`
    #[instrument(skip(self, rng), fields(character_id = %character_id, minigame = %minigame_id))]
    pub async fn play_minigame_with_rng<R: Rng + Send>(
        &self,
        character_id: CharacterId,
        minigame_id: &str,
        rng: &mut R,
    ) -> Result<PlayOutcome, PlayError> {
        let definition = self.catalog.definition_of(minigame_id).inspect_err(|_| {
            warn!("Rejected play of unknown minigame");
        })?;

        for attempt in 1..=self.max_attempts {
            let character = self.load_character(character_id).await?;
            if let Err(e) = Self::validate_eligibility(&character, definition) {
                warn!(error = %e, "Rejected minigame play");
                return Err(e);
            }

            let rewards = generate_rewards(definition.id, character.level, rng);
            let (next, applied) = Ledger::apply_play(&character, definition, &rewards)?;

            match self
                .characters
                .save(&next, character.version, &applied.items)
                .await
            {
                Ok(version) => debug!(version, "Committed ledger transition"),
                Err(RepoError::Conflict { .. }) => {
                    warn!(attempt, "Concurrent update detected, reloading character");
                    continue;
                }
                Err(RepoError::NotFound) => return Err(PlayError::CharacterNotFound(character_id)),
                Err(e) => {
                    error!(error = %e, "Failed to commit minigame play");
                    return Err(PlayError::PersistenceUnavailable(e.to_string()));
                }
            }

            info!(
                net_gold = applied.net_gold(),
                experience = applied.experience_gained,
                items = applied.items.len(),
                new_gold = next.gold,
                new_fatigue = next.fatigue,
                "Minigame played"
            );

            return Ok(PlayOutcome {
                minigame: definition.id,
                rewards,
                new_fatigue: next.fatigue,
                new_gold: next.gold,
                applied,
            });
        }

        error!(attempts = self.max_attempts, "Giving up after repeated version conflicts");
        Err(PlayError::PersistenceConflict {
            attempts: self.max_attempts,
        })
    }

    /// Level gate first, then gold gate
    fn validate_eligibility(
        character: &Character,
        definition: &MinigameDefinition,
    ) -> Result<(), PlayError> {
        if character.level < definition.required_level {
            return Err(PlayError::InsufficientLevel {
                required: definition.required_level,
                current: character.level,
            });
        }
        if character.gold < definition.cost {
            return Err(PlayError::InsufficientGold {
                cost: definition.cost,
                available: character.gold,
            });
        }
        Ok(())
    }

    async fn load_character(&self, character_id: CharacterId) -> Result<Character, PlayError> {
        self.characters
            .load(character_id)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load character");
                PlayError::PersistenceUnavailable(e.to_string())
            })?
            .ok_or(PlayError::CharacterNotFound(character_id))
    }
}
