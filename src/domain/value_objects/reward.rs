//! Reward bundles produced by a single play

use serde::{Deserialize, Serialize};

/// Kinds of item a reward can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "equipment")]
    Equipment,
    #[serde(rename = "enhance_ticket")]
    EnhancementTicket,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::EnhancementTicket => "enhance_ticket",
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equipment" => Ok(Self::Equipment),
            "enhance_ticket" => Ok(Self::EnhancementTicket),
            other => Err(format!("Unknown item kind: {other}")),
        }
    }
}

/// One item handed to the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrant {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Item level, always at least 1
    pub level: u32,
}

impl ItemGrant {
    pub fn equipment(level: u32) -> Self {
        Self {
            kind: ItemKind::Equipment,
            level: level.max(1),
        }
    }

    pub fn enhancement_ticket(level: u32) -> Self {
        Self {
            kind: ItemKind::EnhancementTicket,
            level: level.max(1),
        }
    }
}

/// Gold, experience and items earned from one play.
///
/// Never persisted as-is; the ledger folds it into the character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBundle {
    #[serde(rename = "gold")]
    pub gold_delta: u64,
    #[serde(rename = "exp")]
    pub experience_delta: u64,
    pub items: Vec<ItemGrant>,
}

impl RewardBundle {
    pub fn gold(amount: u64) -> Self {
        Self {
            gold_delta: amount,
            ..Self::default()
        }
    }

    pub fn experience(amount: u64) -> Self {
        Self {
            experience_delta: amount,
            ..Self::default()
        }
    }

    pub fn item(item: ItemGrant) -> Self {
        Self {
            items: vec![item],
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: ItemGrant) -> Self {
        self.items.push(item);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_json_shape() {
        let bundle = RewardBundle::gold(1500).with_item(ItemGrant::enhancement_ticket(25));
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "gold": 1500,
                "exp": 0,
                "items": [{ "type": "enhance_ticket", "level": 25 }]
            })
        );
    }

    #[test]
    fn test_item_level_floor_is_one() {
        assert_eq!(ItemGrant::equipment(0).level, 1);
    }
}
