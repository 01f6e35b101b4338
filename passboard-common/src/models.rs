//! Data models shared by the aggregation pipeline
//!
//! Pass store payloads are camelCase JSON. Every optional field carries a serde
//! default so that older passes (missing history or tiers) still decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One asset of a collection, as reported by the asset index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Asset address (identity)
    pub id: String,
    /// Current owner address
    pub owner_address: String,
}

impl AssetRecord {
    pub fn new(id: impl Into<String>, owner_address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_address: owner_address.into(),
        }
    }
}

/// Loyalty pass state attached to a single asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassState {
    /// Asset the pass belongs to (filled in by the enricher when the store omits it)
    #[serde(default)]
    pub asset_id: String,
    /// Display name of the pass
    #[serde(default)]
    pub name: String,
    /// Accumulated experience points
    #[serde(default)]
    pub xp: u64,
    /// Timestamp of the most recent action, as the store reports it
    #[serde(default)]
    pub last_action: Option<String>,
    /// Tier name the store currently assigns to this pass
    #[serde(default)]
    pub current_tier: String,
    #[serde(default)]
    pub action_history: Vec<ActionRecord>,
    /// Program tier table, ordered by ascending requirement
    #[serde(default)]
    pub reward_tiers: Vec<RewardTier>,
}

/// A single XP-awarding action in a pass history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub points: u64,
    pub timestamp: ActionTimestamp,
}

/// Action timestamp
///
/// The store emits epoch milliseconds; some deployments emit preformatted
/// strings. Both are rendered as text for external consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionTimestamp {
    Millis(i64),
    Text(String),
}

impl fmt::Display for ActionTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionTimestamp::Millis(ms) => write!(f, "{}", ms),
            ActionTimestamp::Text(text) => f.write_str(text),
        }
    }
}

/// Named reward bracket unlocked at a minimum XP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTier {
    pub name: String,
    pub xp_required: u64,
    #[serde(default)]
    pub rewards: Vec<String>,
}

impl RewardTier {
    pub fn new(name: impl Into<String>, xp_required: u64) -> Self {
        Self {
            name: name.into(),
            xp_required,
            rewards: Vec::new(),
        }
    }
}

/// Loyalty program metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramMeta {
    pub name: String,
    #[serde(default)]
    pub num_minted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pass_state_decodes_store_payload() {
        let payload = json!({
            "name": "Coffee Club Pass",
            "xp": 250,
            "lastAction": "2025-03-01T10:00:00Z",
            "currentTier": "Silver",
            "actionHistory": [
                { "type": "purchase", "points": 200, "timestamp": 1740823200000i64, "newTotal": 200 },
                { "type": "review", "points": 50, "timestamp": "2025-03-01T10:00:00Z" }
            ],
            "rewardTiers": [
                { "name": "Grind", "xpRequired": 0, "rewards": ["nothing"] },
                { "name": "Silver", "xpRequired": 200 }
            ],
            "owner": "ignored-field"
        });

        let pass: PassState = serde_json::from_value(payload).unwrap();
        assert_eq!(pass.xp, 250);
        assert_eq!(pass.asset_id, "");
        assert_eq!(pass.action_history[0].kind, "purchase");
        assert_eq!(pass.action_history[0].timestamp.to_string(), "1740823200000");
        assert_eq!(pass.action_history[1].timestamp.to_string(), "2025-03-01T10:00:00Z");
        assert_eq!(pass.reward_tiers[1], RewardTier::new("Silver", 200));
    }

    #[test]
    fn test_pass_state_defaults_missing_fields() {
        let pass: PassState = serde_json::from_value(json!({ "xp": 10 })).unwrap();
        assert_eq!(pass.last_action, None);
        assert!(pass.action_history.is_empty());
        assert!(pass.reward_tiers.is_empty());
    }

    #[test]
    fn test_negative_xp_is_rejected() {
        let result = serde_json::from_value::<PassState>(json!({ "xp": -5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_program_meta_decodes() {
        let meta: ProgramMeta =
            serde_json::from_value(json!({ "name": "Coffee Club", "numMinted": 42, "uri": "x" })).unwrap();
        assert_eq!(meta.name, "Coffee Club");
        assert_eq!(meta.num_minted, 42);
    }
}
