//! Ledger - atomic resource transitions on a character
//!
//! Every transition takes the current character by reference and returns a
//! complete successor value. Nothing is mutated in place, so a failed or
//! abandoned transition can never leave a half-updated character behind;
//! the caller commits the successor as a single write.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Character, MAX_FATIGUE};
use crate::domain::services::battle::BattleOutcome;
use crate::domain::value_objects::{ItemGrant, MinigameDefinition, RewardBundle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Level {current} is below the required level {required}")]
    InsufficientLevel { required: u32, current: u32 },

    #[error("Not enough gold: {cost} required, {available} available")]
    InsufficientGold { cost: u64, available: u64 },
}

/// What a transition actually changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDelta {
    pub gold_spent: u64,
    pub gold_gained: u64,
    pub experience_gained: u64,
    /// Fatigue actually removed, after clamping at zero
    pub fatigue_recovered: u32,
    /// Items to hand to the inventory
    pub items: Vec<ItemGrant>,
}

impl AppliedDelta {
    /// Net gold change; may be negative, zero or positive
    pub fn net_gold(&self) -> i64 {
        let gained = i64::try_from(self.gold_gained).unwrap_or(i64::MAX);
        let spent = i64::try_from(self.gold_spent).unwrap_or(i64::MAX);
        gained.saturating_sub(spent)
    }
}

pub struct Ledger;

impl Ledger {
    /// Apply one validated minigame play.
    ///
    /// Debits the entry cost, recovers fatigue, credits reward gold and
    /// experience and bumps the play counter, all in the returned value.
    pub fn apply_play(
        character: &Character,
        definition: &MinigameDefinition,
        reward: &RewardBundle,
    ) -> Result<(Character, AppliedDelta), LedgerError> {
        if character.level < definition.required_level {
            return Err(LedgerError::InsufficientLevel {
                required: definition.required_level,
                current: character.level,
            });
        }
        let Some(remaining_gold) = character.gold.checked_sub(definition.cost) else {
            return Err(LedgerError::InsufficientGold {
                cost: definition.cost,
                available: character.gold,
            });
        };

        let mut next = character.clone();

        let fatigue = character.fatigue.min(MAX_FATIGUE);
        next.fatigue = fatigue.saturating_sub(definition.fatigue_recovery);
        next.experience = character.experience.saturating_add(reward.experience_delta);
        next.gold = remaining_gold.saturating_add(reward.gold_delta);
        *next.minigame_play_counts.entry(definition.id).or_insert(0) += 1;

        let delta = AppliedDelta {
            gold_spent: definition.cost,
            gold_gained: reward.gold_delta,
            experience_gained: reward.experience_delta,
            fatigue_recovered: fatigue - next.fatigue,
            items: reward.items.clone(),
        };

        Ok((next, delta))
    }

    /// Apply a resolved battle. Gold and experience are credited; fatigue and
    /// play counters are left alone.
    pub fn apply_battle(character: &Character, outcome: &BattleOutcome) -> (Character, AppliedDelta) {
        let mut next = character.clone();
        next.gold = character.gold.saturating_add(outcome.gold_delta);
        next.experience = character.experience.saturating_add(outcome.experience_delta);

        let delta = AppliedDelta {
            gold_gained: outcome.gold_delta,
            experience_gained: outcome.experience_delta,
            items: outcome.items.clone(),
            ..AppliedDelta::default()
        };

        (next, delta)
    }
}
