//! Minigame kinds and their static definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of minigames the reward tables know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinigameKind {
    /// Capsule toy machine: equipment or enhancement tickets
    Capsule,
    /// Crouched-down arcade session: gold
    Arcade,
    /// Raising chicks and quails: experience
    Pets,
    /// Phone under the desk: a random pick of gold, experience or equipment
    Phone,
    /// Stationery-shop gambling: high risk, high reward
    Gambling,
}

impl MinigameKind {
    pub const ALL: [MinigameKind; 5] = [
        MinigameKind::Capsule,
        MinigameKind::Arcade,
        MinigameKind::Pets,
        MinigameKind::Phone,
        MinigameKind::Gambling,
    ];

    /// Wire identifier used by clients and configuration
    pub fn id(&self) -> &'static str {
        match self {
            Self::Capsule => "capsule",
            Self::Arcade => "arcade",
            Self::Pets => "pets",
            Self::Phone => "phone",
            Self::Gambling => "gambling",
        }
    }
}

impl fmt::Display for MinigameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown minigame: {0}")]
pub struct UnknownMinigameKind(pub String);

impl FromStr for MinigameKind {
    type Err = UnknownMinigameKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| UnknownMinigameKind(s.to_string()))
    }
}

/// Immutable definition of one playable minigame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameDefinition {
    pub id: MinigameKind,
    pub display_name: String,
    pub required_level: u32,
    pub cost: u64,
    pub fatigue_recovery: u32,
}

impl MinigameDefinition {
    pub fn new(
        id: MinigameKind,
        display_name: impl Into<String>,
        required_level: u32,
        cost: u64,
        fatigue_recovery: u32,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            required_level,
            cost,
            fatigue_recovery,
        }
    }

    /// Shipped defaults for a kind
    pub fn default_for(kind: MinigameKind) -> Self {
        match kind {
            MinigameKind::Capsule => Self::new(kind, "캡슐 뽑기", 5, 100, 10),
            MinigameKind::Arcade => Self::new(kind, "쪼그려 앉아 하는 오락실", 10, 200, 15),
            MinigameKind::Pets => Self::new(kind, "병아리/메추리 키우기", 15, 300, 20),
            MinigameKind::Phone => Self::new(kind, "선생님 몰래 핸드폰하기", 20, 150, 25),
            MinigameKind::Gambling => Self::new(kind, "문방구 도박게임", 25, 500, 30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_wire_ids() {
        for kind in MinigameKind::ALL {
            assert_eq!(kind.id().parse::<MinigameKind>().unwrap(), kind);
        }
        assert!("slots".parse::<MinigameKind>().is_err());
        assert!("Arcade".parse::<MinigameKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_as_wire_id() {
        let json = serde_json::to_string(&MinigameKind::Gambling).unwrap();
        assert_eq!(json, "\"gambling\"");
    }
}
