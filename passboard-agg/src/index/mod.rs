//! Asset index client
//!
//! Walks a collection's assets page by page until the index returns an empty
//! page. The index itself is behind [`AssetIndexService`] so the pagination
//! loop can be driven by the JSON-RPC client in [`das`] or by a fake.
//!
//! # Back-pressure
//! A fixed delay follows every page request, whether or not more pages remain.
//! The delay is not adaptive; it only keeps us under the index's rate limit.

pub mod das;

use crate::error::{AggregationError, AggregationResult, IndexError};
use async_trait::async_trait;
use passboard_common::config::PaginationConfig;
use passboard_common::AssetRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

pub use das::DasAssetIndex;

/// One page of a collection, as served by the index
#[async_trait]
pub trait AssetIndexService: Send + Sync {
    /// Fetch page `page` (1-based) of at most `limit` assets
    ///
    /// An empty vector means there are no further pages.
    async fn fetch_page(
        &self,
        collection: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<AssetRecord>, IndexError>;
}

/// Paging parameters for [`AssetIndexClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub page_size: u32,
    pub page_delay: Duration,
    /// Ceiling on pages fetched; a non-empty page at the ceiling is an error
    pub max_pages: u32,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self::from(&PaginationConfig::default())
    }
}

impl From<&PaginationConfig> for PaginationPolicy {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            page_size: config.page_size,
            page_delay: config.page_delay(),
            max_pages: config.max_pages,
        }
    }
}

/// Reject an empty collection address before any I/O
pub fn require_address(address: &str) -> AggregationResult<&str> {
    if address.trim().is_empty() {
        return Err(AggregationError::InvalidArgument(
            "Collection address is required".to_string(),
        ));
    }
    Ok(address)
}

/// Paginating client over an [`AssetIndexService`]
pub struct AssetIndexClient {
    service: Arc<dyn AssetIndexService>,
    policy: PaginationPolicy,
}

impl AssetIndexClient {
    pub fn new(service: Arc<dyn AssetIndexService>, policy: PaginationPolicy) -> Self {
        Self { service, policy }
    }

    /// Fetch every asset of `collection`, in index order
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty address
    /// - `IndexService` if any page fails (no partial result)
    /// - `TooManyPages` if page `max_pages` is still non-empty
    pub async fn fetch_all_assets(&self, collection: &str) -> AggregationResult<Vec<AssetRecord>> {
        let collection = require_address(collection)?;
        let mut assets: Vec<AssetRecord> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let items = self
                .service
                .fetch_page(collection, page, self.policy.page_size)
                .await?;

            debug!(
                collection = %collection,
                page,
                items = items.len(),
                "Fetched asset index page"
            );

            let exhausted = items.is_empty();
            assets.extend(items);

            if !self.policy.page_delay.is_zero() {
                sleep(self.policy.page_delay).await;
            }

            if exhausted {
                break;
            }
            if page >= self.policy.max_pages {
                return Err(AggregationError::TooManyPages {
                    max_pages: self.policy.max_pages,
                });
            }
            page += 1;
        }

        info!(
            collection = %collection,
            pages = page,
            assets = assets.len(),
            "Asset index walk complete"
        );

        Ok(assets)
    }
}
