//! Leaderboard assembly
//!
//! Per owner: sum XP over resolvable passes, take the tier table of the first
//! pass (in the owner's asset order) that carries one, keep the greatest
//! `lastAction`, then resolve tier and level. Owners are stable-sorted by XP
//! descending and ranked 1..N.

use crate::aggregator::{Aggregator, EnrichedCollection};
use crate::error::{AggregationError, AggregationResult};
use crate::grouping::OwnerGroup;
use crate::tier::resolve_tier_and_level;
use passboard_common::{PassState, ProgramMeta, RewardTier};
use serde::Serialize;
use tracing::{error, info};

/// One ranked owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "LeaderboardMember")]
pub struct MemberAggregate {
    pub address: String,
    pub primary_asset_id: String,
    pub total_xp: u64,
    pub last_action: Option<String>,
    pub tier_name: String,
    pub level: u32,
    /// 1-based, assigned after sorting
    pub rank: u32,
}

/// Leaderboard payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub members: Vec<MemberAggregate>,
    pub program_name: String,
    /// Raw asset count, not distinct owners
    pub total_minted: u64,
    pub total_members: u64,
}

/// External shape of a leaderboard row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardMember {
    address: String,
    asset_address: String,
    total_xp: u64,
    last_action: Option<String>,
    current_tier: String,
    current_level: String,
    level: u32,
    rank: u32,
}

impl From<MemberAggregate> for LeaderboardMember {
    fn from(member: MemberAggregate) -> Self {
        Self {
            address: member.address,
            asset_address: member.primary_asset_id,
            total_xp: member.total_xp,
            last_action: member.last_action,
            current_tier: member.tier_name,
            current_level: member.level.to_string(),
            level: member.level,
            rank: member.rank,
        }
    }
}

/// Running totals for one owner
#[derive(Debug, Default)]
struct GroupTally {
    total_xp: u64,
    last_action: Option<String>,
    reward_tiers: Vec<RewardTier>,
}

impl GroupTally {
    fn absorb(&mut self, pass: &PassState) {
        self.total_xp = self.total_xp.saturating_add(pass.xp);

        // Plain string comparison; ISO-8601 UTC timestamps order correctly.
        if let Some(action) = pass.last_action.as_ref().filter(|a| !a.is_empty()) {
            if self.last_action.as_ref().map_or(true, |latest| action > latest) {
                self.last_action = Some(action.clone());
            }
        }

        if self.reward_tiers.is_empty() && !pass.reward_tiers.is_empty() {
            self.reward_tiers = pass.reward_tiers.clone();
        }
    }
}

/// Build one unranked aggregate from a group and its aligned passes
fn aggregate_group(group: &OwnerGroup, passes: &[Option<PassState>]) -> MemberAggregate {
    let mut tally = GroupTally::default();
    for pass in passes.iter().flatten() {
        tally.absorb(pass);
    }

    let resolved = resolve_tier_and_level(tally.total_xp, &tally.reward_tiers);

    MemberAggregate {
        address: group.owner.clone(),
        primary_asset_id: group.primary_asset_id().to_string(),
        total_xp: tally.total_xp,
        last_action: tally.last_action,
        tier_name: resolved.tier_name,
        level: resolved.level,
        rank: 0,
    }
}

/// Stable sort by XP descending and assign ranks 1..N
pub fn rank_members(mut members: Vec<MemberAggregate>) -> Vec<MemberAggregate> {
    members.sort_by(|a, b| b.total_xp.cmp(&a.total_xp));
    for (idx, member) in members.iter_mut().enumerate() {
        member.rank = idx as u32 + 1;
    }
    members
}

/// Combine an enriched collection and its program metadata into a leaderboard
pub(crate) fn assemble_leaderboard(
    collection: EnrichedCollection,
    program: ProgramMeta,
) -> LeaderboardResponse {
    let members: Vec<MemberAggregate> = collection
        .groups
        .iter()
        .zip(collection.passes.iter())
        .map(|(group, passes)| aggregate_group(group, passes))
        .collect();
    let members = rank_members(members);

    LeaderboardResponse {
        total_members: members.len() as u64,
        members,
        program_name: program.name,
        total_minted: collection.total_assets as u64,
    }
}

impl Aggregator {
    /// Ranked leaderboard for `collection`
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty address
    /// - `IndexService` / `TooManyPages` if the asset index cannot be walked
    /// - `AggregationFailed` if the program metadata cannot be fetched
    ///
    /// Per-asset pass failures are absorbed (zero XP contribution).
    pub async fn build_leaderboard(&self, collection: &str) -> AggregationResult<LeaderboardResponse> {
        let result = self.try_build_leaderboard(collection).await;
        if let Err(ref e) = result {
            error!(collection = %collection, error = %e, "Error building leaderboard");
        }
        result
    }

    async fn try_build_leaderboard(&self, collection: &str) -> AggregationResult<LeaderboardResponse> {
        let enriched = self.load_collection(collection).await?;

        let program = self
            .enricher()
            .fetch_program(collection)
            .await
            .map_err(|e| AggregationError::failed("leaderboard", e))?;

        let leaderboard = assemble_leaderboard(enriched, program);
        info!(
            collection = %collection,
            members = leaderboard.total_members,
            minted = leaderboard.total_minted,
            "Leaderboard built"
        );
        Ok(leaderboard)
    }
}
