//! Character, inventory and error response shapes

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::Character;
use crate::domain::value_objects::ItemGrant;

#[derive(Debug, Serialize)]
pub struct CharacterResponseDto {
    pub id: String,
    pub account_id: String,
    pub level: u32,
    pub exp: u64,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold: u64,
    pub fatigue: u32,
    pub last_fatigue_reset: String,
    pub mini_games_played: BTreeMap<String, u64>,
}

impl From<Character> for CharacterResponseDto {
    fn from(c: Character) -> Self {
        Self {
            id: c.id.to_string(),
            account_id: c.account_id.to_string(),
            level: c.level,
            exp: c.experience,
            hp: c.hp,
            attack: c.attack,
            defense: c.defense,
            gold: c.gold,
            fatigue: c.fatigue,
            last_fatigue_reset: c.last_fatigue_reset.to_rfc3339(),
            mini_games_played: c
                .minigame_play_counts
                .into_iter()
                .map(|(kind, count)| (kind.to_string(), count))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemListResponseDto {
    pub items: Vec<ItemGrant>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub code: &'static str,
}
