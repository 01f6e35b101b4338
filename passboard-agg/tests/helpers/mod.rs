//! Shared fakes for passboard-agg integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use passboard_agg::index::{AssetIndexClient, AssetIndexService, PaginationPolicy};
use passboard_agg::pass_store::{PassEnricher, PassStore};
use passboard_agg::{Aggregator, IndexError, PassFetchError};
use passboard_common::{AssetRecord, PassState, ProgramMeta, RewardTier};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory asset index serving a fixed asset list in pages
pub struct FakeIndex {
    assets: Vec<AssetRecord>,
    pub page_requests: AtomicU32,
}

impl FakeIndex {
    pub fn new(assets: Vec<AssetRecord>) -> Self {
        Self {
            assets,
            page_requests: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl AssetIndexService for FakeIndex {
    async fn fetch_page(
        &self,
        _collection: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<AssetRecord>, IndexError> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        let start = ((page - 1) * limit) as usize;
        Ok(self
            .assets
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// In-memory pass store; listed assets fail, unknown assets are not found
#[derive(Default)]
pub struct FakeStore {
    passes: HashMap<String, PassState>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    program: Option<ProgramMeta>,
}

impl FakeStore {
    pub fn with_program(mut self, name: &str) -> Self {
        self.program = Some(ProgramMeta {
            name: name.to_string(),
            num_minted: 0,
        });
        self
    }

    pub fn with_pass(mut self, asset_id: &str, xp: u64) -> Self {
        self.passes.insert(asset_id.to_string(), pass_state(xp, None, tiers()));
        self
    }

    pub fn with_pass_state(mut self, asset_id: &str, pass: PassState) -> Self {
        self.passes.insert(asset_id.to_string(), pass);
        self
    }

    pub fn failing(mut self, asset_id: &str) -> Self {
        self.failing.insert(asset_id.to_string());
        self
    }

    pub fn delayed(mut self, asset_id: &str, delay_ms: u64) -> Self {
        self.delays
            .insert(asset_id.to_string(), Duration::from_millis(delay_ms));
        self
    }
}

#[async_trait]
impl PassStore for FakeStore {
    async fn get_pass(&self, asset_id: &str) -> Result<PassState, PassFetchError> {
        if let Some(delay) = self.delays.get(asset_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(asset_id) {
            return Err(PassFetchError::Network(format!("store unavailable for {}", asset_id)));
        }
        self.passes
            .get(asset_id)
            .cloned()
            .ok_or_else(|| PassFetchError::NotFound(asset_id.to_string()))
    }

    async fn get_program(&self, program: &str) -> Result<ProgramMeta, PassFetchError> {
        self.program
            .clone()
            .ok_or_else(|| PassFetchError::NotFound(program.to_string()))
    }
}

pub fn tiers() -> Vec<RewardTier> {
    vec![
        RewardTier::new("Bronze", 0),
        RewardTier::new("Silver", 100),
        RewardTier::new("Gold", 500),
    ]
}

pub fn pass_state(xp: u64, last_action: Option<&str>, reward_tiers: Vec<RewardTier>) -> PassState {
    PassState {
        asset_id: String::new(),
        name: String::new(),
        xp,
        last_action: last_action.map(str::to_string),
        current_tier: String::new(),
        action_history: Vec::new(),
        reward_tiers,
    }
}

pub fn asset(id: &str, owner: &str) -> AssetRecord {
    AssetRecord::new(id, owner)
}

/// Aggregator over fakes with no paging delay
pub fn aggregator(index: Arc<FakeIndex>, store: FakeStore, page_size: u32) -> Aggregator {
    let policy = PaginationPolicy {
        page_size,
        page_delay: Duration::ZERO,
        max_pages: 100,
    };
    Aggregator::new(
        AssetIndexClient::new(index, policy),
        PassEnricher::new(Arc::new(store), 4, Duration::from_secs(2)),
    )
}
