//! Character entity - a player's progression and resource state

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AccountId, CharacterId, MinigameKind};

/// Upper bound of the fatigue gauge
pub const MAX_FATIGUE: u32 = 100;

/// A player character, owned by exactly one account.
///
/// Resource fields are only changed through ledger transitions; `version`
/// is bumped by the store on every committed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub account_id: AccountId,

    // Progression
    pub level: u32,
    pub experience: u64,

    // Combat stats
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,

    // Resources
    pub gold: u64,
    /// Always within `0..=MAX_FATIGUE`
    pub fatigue: u32,
    pub last_fatigue_reset: DateTime<Utc>,
    pub minigame_play_counts: BTreeMap<MinigameKind, u64>,

    /// Optimistic concurrency token
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl Character {
    /// A freshly registered character with the standard starting values
    pub fn new(account_id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            account_id,
            level: 1,
            experience: 0,
            hp: 100,
            attack: 10,
            defense: 5,
            gold: 0,
            fatigue: 0,
            last_fatigue_reset: now,
            minigame_play_counts: BTreeMap::new(),
            version: 0,
            created_at: now,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_gold(mut self, gold: u64) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_fatigue(mut self, fatigue: u32) -> Self {
        self.fatigue = fatigue.min(MAX_FATIGUE);
        self
    }

    pub fn play_count(&self, kind: MinigameKind) -> u64 {
        self.minigame_play_counts.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character_defaults() {
        let character = Character::new(AccountId::new());
        assert_eq!(character.level, 1);
        assert_eq!(character.experience, 0);
        assert_eq!(character.hp, 100);
        assert_eq!(character.attack, 10);
        assert_eq!(character.defense, 5);
        assert_eq!(character.gold, 0);
        assert_eq!(character.fatigue, 0);
        assert_eq!(character.version, 0);
        assert!(character.minigame_play_counts.is_empty());
    }

    #[test]
    fn test_builders_respect_bounds() {
        let character = Character::new(AccountId::new())
            .with_level(0)
            .with_fatigue(250);
        assert_eq!(character.level, 1);
        assert_eq!(character.fatigue, MAX_FATIGUE);
        assert_eq!(character.play_count(MinigameKind::Pets), 0);
    }
}
