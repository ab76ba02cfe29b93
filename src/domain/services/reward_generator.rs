//! Reward tables for minigame plays
//!
//! Pure functions of (minigame, player level, random source). The random
//! source is always supplied by the caller so plays can be replayed with a
//! seeded generator.

use rand::Rng;

use crate::domain::value_objects::{ItemGrant, MinigameKind, RewardBundle};

const CAPSULE_EQUIPMENT_CHANCE: f64 = 0.30;
const CAPSULE_LEVEL_PENALTY: u32 = 5;

const ARCADE_GOLD: (u64, u64) = (300, 800);

const PETS_EXPERIENCE: (u64, u64) = (50, 150);

const PHONE_GOLD: (u64, u64) = (200, 500);
const PHONE_EXPERIENCE: (u64, u64) = (30, 100);
const PHONE_LEVEL_PENALTY: u32 = 3;

const GAMBLING_JACKPOT_CHANCE: f64 = 0.40;
const GAMBLING_JACKPOT_GOLD: (u64, u64) = (1000, 2000);
const GAMBLING_CONSOLATION_GOLD: (u64, u64) = (100, 300);

/// Roll the reward bundle for one play of `kind` by a character at `player_level`
pub fn generate_rewards<R: Rng + ?Sized>(
    kind: MinigameKind,
    player_level: u32,
    rng: &mut R,
) -> RewardBundle {
    match kind {
        MinigameKind::Capsule => {
            let level = item_level(player_level, CAPSULE_LEVEL_PENALTY);
            if rng.gen_bool(CAPSULE_EQUIPMENT_CHANCE) {
                RewardBundle::item(ItemGrant::equipment(level))
            } else {
                RewardBundle::item(ItemGrant::enhancement_ticket(level))
            }
        }
        MinigameKind::Arcade => RewardBundle::gold(sample(rng, ARCADE_GOLD)),
        MinigameKind::Pets => RewardBundle::experience(sample(rng, PETS_EXPERIENCE)),
        MinigameKind::Phone => match rng.gen_range(0..3) {
            0 => RewardBundle::gold(sample(rng, PHONE_GOLD)),
            1 => RewardBundle::experience(sample(rng, PHONE_EXPERIENCE)),
            _ => RewardBundle::item(ItemGrant::equipment(item_level(
                player_level,
                PHONE_LEVEL_PENALTY,
            ))),
        },
        MinigameKind::Gambling => {
            if rng.gen_bool(GAMBLING_JACKPOT_CHANCE) {
                RewardBundle::gold(sample(rng, GAMBLING_JACKPOT_GOLD))
                    .with_item(ItemGrant::enhancement_ticket(player_level))
            } else {
                RewardBundle::gold(sample(rng, GAMBLING_CONSOLATION_GOLD))
            }
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, (low, high): (u64, u64)) -> u64 {
    rng.gen_range(low..=high)
}

fn item_level(player_level: u32, penalty: u32) -> u32 {
    player_level.saturating_sub(penalty).max(1)
}
