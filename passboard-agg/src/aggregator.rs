//! Aggregation entry point
//!
//! [`Aggregator`] owns the asset index client and the pass enricher. The
//! leaderboard and member assemblers (see `leaderboard.rs` and `members.rs`)
//! share the index walk, owner grouping and enrichment steps implemented here.

use crate::error::AggregationResult;
use crate::grouping::{group_by_owner, OwnerGroup};
use crate::index::{AssetIndexClient, AssetIndexService, DasAssetIndex, PaginationPolicy};
use crate::pass_store::{HttpPassStore, PassEnricher, PassStore};
use passboard_common::config::TomlConfig;
use passboard_common::{Error, PassState, Result};
use std::sync::Arc;
use tracing::info;

/// Request-scoped view of a collection: groups plus their enriched passes
pub(crate) struct EnrichedCollection {
    /// Raw asset count reported by the index
    pub total_assets: usize,
    pub groups: Vec<OwnerGroup>,
    /// `passes[g][a]` belongs to `groups[g].assets[a]`
    pub passes: Vec<Vec<Option<PassState>>>,
}

/// Collection member aggregation pipeline
pub struct Aggregator {
    index: AssetIndexClient,
    enricher: PassEnricher,
}

impl Aggregator {
    pub fn new(index: AssetIndexClient, enricher: PassEnricher) -> Self {
        Self { index, enricher }
    }

    /// Wire the JSON-RPC index and HTTP pass store from configuration
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        let index: Arc<dyn AssetIndexService> = Arc::new(
            DasAssetIndex::new(&config.index_endpoint, config.pagination.timeout())
                .map_err(|e| Error::Config(e.to_string()))?,
        );
        let store: Arc<dyn PassStore> = Arc::new(
            HttpPassStore::new(&config.pass_store_url, config.enrichment.timeout())
                .map_err(|e| Error::Config(e.to_string()))?,
        );

        Ok(Self::new(
            AssetIndexClient::new(index, PaginationPolicy::from(&config.pagination)),
            PassEnricher::from_config(store, &config.enrichment),
        ))
    }

    pub fn enricher(&self) -> &PassEnricher {
        &self.enricher
    }

    /// Fetch, group and enrich every asset of `collection`
    pub(crate) async fn load_collection(
        &self,
        collection: &str,
    ) -> AggregationResult<EnrichedCollection> {
        let assets = self.index.fetch_all_assets(collection).await?;
        let total_assets = assets.len();

        let groups = group_by_owner(assets);
        let passes = self.enricher.enrich_groups(&groups).await;

        let resolved = passes.iter().flatten().filter(|p| p.is_some()).count();
        info!(
            collection = %collection,
            assets = total_assets,
            owners = groups.len(),
            passes = resolved,
            "Collection enriched"
        );

        Ok(EnrichedCollection {
            total_assets,
            groups,
            passes,
        })
    }
}
