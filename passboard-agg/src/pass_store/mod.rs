//! Pass store access and per-asset enrichment
//!
//! [`PassEnricher`] turns every pass store failure for a single asset into
//! "absent" so one bad asset never aborts a batch. Batch calls fan out with a
//! bounded number of in-flight requests and return results in input order.

pub mod http;

use crate::error::PassFetchError;
use crate::grouping::OwnerGroup;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use passboard_common::config::EnrichmentConfig;
use passboard_common::{PassState, ProgramMeta};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

pub use http::HttpPassStore;

/// Read access to loyalty pass and program state
#[async_trait]
pub trait PassStore: Send + Sync {
    /// Pass state attached to one asset
    async fn get_pass(&self, asset_id: &str) -> Result<PassState, PassFetchError>;

    /// Metadata of a loyalty program (keyed by collection address)
    async fn get_program(&self, program: &str) -> Result<ProgramMeta, PassFetchError>;
}

/// Failure-tolerant, bounded-concurrency front end to a [`PassStore`]
pub struct PassEnricher {
    store: Arc<dyn PassStore>,
    concurrency: usize,
    call_timeout: Duration,
}

impl PassEnricher {
    pub fn new(store: Arc<dyn PassStore>, concurrency: usize, call_timeout: Duration) -> Self {
        Self {
            store,
            concurrency: concurrency.max(1),
            call_timeout,
        }
    }

    pub fn from_config(store: Arc<dyn PassStore>, config: &EnrichmentConfig) -> Self {
        Self::new(store, config.concurrency, config.timeout())
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, PassFetchError>>,
    ) -> Result<T, PassFetchError> {
        timeout(self.call_timeout, call)
            .await
            .map_err(|_| PassFetchError::Timeout(self.call_timeout))?
    }

    /// Fetch one pass, surfacing the failure
    pub async fn fetch_pass(&self, asset_id: &str) -> Result<PassState, PassFetchError> {
        let mut pass = self.bounded(self.store.get_pass(asset_id)).await?;
        if pass.asset_id.is_empty() {
            pass.asset_id = asset_id.to_string();
        }
        Ok(pass)
    }

    /// Fetch program metadata, surfacing the failure
    pub async fn fetch_program(&self, program: &str) -> Result<ProgramMeta, PassFetchError> {
        self.bounded(self.store.get_program(program)).await
    }

    /// Fetch one pass; any failure is logged and yields `None`
    pub async fn enrich(&self, asset_id: &str) -> Option<PassState> {
        match self.fetch_pass(asset_id).await {
            Ok(pass) => {
                debug!(asset_id = %asset_id, xp = pass.xp, "Fetched pass state");
                Some(pass)
            }
            Err(e) => {
                warn!(
                    asset_id = %asset_id,
                    error = %e,
                    "Error fetching pass state, treating as absent"
                );
                None
            }
        }
    }

    /// Enrich many assets; output index `i` belongs to input index `i`
    pub async fn enrich_all<'a, I>(&self, asset_ids: I) -> Vec<Option<PassState>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        stream::iter(asset_ids)
            .map(|asset_id| self.enrich(asset_id))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Enrich every asset of every group in one bounded fan-out
    ///
    /// Returns one vector per group, aligned with the group's asset order.
    pub async fn enrich_groups(&self, groups: &[OwnerGroup]) -> Vec<Vec<Option<PassState>>> {
        let flat = self
            .enrich_all(groups.iter().flat_map(|g| g.assets.iter().map(|a| a.id.as_str())))
            .await;

        let mut passes = flat.into_iter();
        groups
            .iter()
            .map(|group| passes.by_ref().take(group.assets.len()).collect())
            .collect()
    }
}
