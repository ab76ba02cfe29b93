//! Minigame catalog listing and play request/response shapes

use serde::{Deserialize, Serialize};

use crate::application::services::{AvailableMinigames, PlayOutcome};
use crate::domain::value_objects::{MinigameDefinition, RewardBundle};

#[derive(Debug, Deserialize)]
pub struct PlayMinigameRequestDto {
    pub game_type: String,
}

#[derive(Debug, Serialize)]
pub struct PlayMinigameResponseDto {
    pub success: bool,
    pub rewards: RewardBundle,
    pub new_fatigue: u32,
    pub new_gold: u64,
}

impl From<PlayOutcome> for PlayMinigameResponseDto {
    fn from(o: PlayOutcome) -> Self {
        Self {
            success: true,
            rewards: o.rewards,
            new_fatigue: o.new_fatigue,
            new_gold: o.new_gold,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MinigameEntryDto {
    pub id: String,
    pub name: String,
    pub required_level: u32,
    pub cost: u64,
    pub fatigue_recovery: u32,
    /// Whether the character meets the level requirement
    pub unlocked: bool,
    pub play_count: u64,
}

impl MinigameEntryDto {
    fn for_character(d: MinigameDefinition, listing: &AvailableMinigames) -> Self {
        Self {
            id: d.id.to_string(),
            unlocked: listing.level >= d.required_level,
            play_count: listing.play_counts.get(&d.id).copied().unwrap_or(0),
            name: d.display_name,
            required_level: d.required_level,
            cost: d.cost,
            fatigue_recovery: d.fatigue_recovery,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MinigameListResponseDto {
    pub catalog: Vec<MinigameEntryDto>,
    pub fatigue: u32,
    pub gold: u64,
}

impl From<AvailableMinigames> for MinigameListResponseDto {
    fn from(mut listing: AvailableMinigames) -> Self {
        let definitions = std::mem::take(&mut listing.catalog);
        Self {
            catalog: definitions
                .into_iter()
                .map(|d| MinigameEntryDto::for_character(d, &listing))
                .collect(),
            fatigue: listing.fatigue,
            gold: listing.gold,
        }
    }
}
