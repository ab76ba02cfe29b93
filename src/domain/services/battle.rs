//! Battle resolution contract
//!
//! Combat mechanics are not implemented here. A resolver only has to turn a
//! character into a `BattleOutcome`; the outcome is committed through
//! `Ledger::apply_battle` like any other transition.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Character;
use crate::domain::value_objects::ItemGrant;

/// Rewards earned from one resolved battle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub gold_delta: u64,
    pub experience_delta: u64,
    pub items: Vec<ItemGrant>,
}

/// Decides the outcome of a battle for a character
pub trait BattleResolver: Send + Sync {
    fn resolve(&self, character: &Character, rng: &mut dyn RngCore) -> BattleOutcome;
}
