//! Member detail assembly
//!
//! Full pass listing per owner. Owners whose passes all failed still appear,
//! with no passes and zero XP. Sorted by XP descending, no rank.

use crate::aggregator::{Aggregator, EnrichedCollection};
use crate::error::AggregationResult;
use passboard_common::{ActionRecord, PassState};
use serde::Serialize;
use tracing::{error, info};

/// One owner with their resolvable passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub address: String,
    pub passes: Vec<MemberPass>,
    /// Sum over `passes` only
    pub total_xp: u64,
}

/// External view of a single pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPass {
    pub public_key: String,
    pub name: String,
    pub xp: u64,
    pub action_history: Vec<MemberAction>,
    pub current_tier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberAction {
    pub action: String,
    pub points: u64,
    pub timestamp: String,
}

impl From<&ActionRecord> for MemberAction {
    fn from(record: &ActionRecord) -> Self {
        Self {
            action: record.kind.clone(),
            points: record.points,
            timestamp: record.timestamp.to_string(),
        }
    }
}

impl MemberPass {
    fn from_pass(asset_id: &str, pass: PassState) -> Self {
        Self {
            public_key: asset_id.to_string(),
            name: pass.name,
            xp: pass.xp,
            action_history: pass.action_history.iter().map(MemberAction::from).collect(),
            current_tier: pass.current_tier,
        }
    }
}

pub(crate) fn assemble_members(collection: EnrichedCollection) -> Vec<Member> {
    let mut members: Vec<Member> = collection
        .groups
        .into_iter()
        .zip(collection.passes)
        .map(|(group, passes)| {
            let passes: Vec<MemberPass> = group
                .assets
                .iter()
                .zip(passes)
                .filter_map(|(asset, pass)| pass.map(|p| MemberPass::from_pass(&asset.id, p)))
                .collect();
            let total_xp = passes.iter().fold(0u64, |sum, p| sum.saturating_add(p.xp));

            Member {
                address: group.owner,
                passes,
                total_xp,
            }
        })
        .collect();

    members.sort_by(|a, b| b.total_xp.cmp(&a.total_xp));
    members
}

impl Aggregator {
    /// Per-member pass listings for `collection`
    ///
    /// Same failure semantics as [`Aggregator::build_leaderboard`]; failed
    /// passes are left out of the listing.
    pub async fn build_members(&self, collection: &str) -> AggregationResult<Vec<Member>> {
        let result = self.load_collection(collection).await.map(assemble_members);
        match &result {
            Ok(members) => info!(collection = %collection, members = members.len(), "Members built"),
            Err(e) => error!(collection = %collection, error = %e, "Error building members"),
        }
        result
    }
}
