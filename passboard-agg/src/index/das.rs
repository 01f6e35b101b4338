//! JSON-RPC asset index client
//!
//! Queries a DAS-capable RPC endpoint with `getAssetsByGroup`.
//!
//! # Wire format
//! Request:
//! ```json
//! { "jsonrpc": "2.0", "id": 1, "method": "getAssetsByGroup",
//!   "params": { "groupKey": "collection", "groupValue": "<address>", "page": 1, "limit": 1000 } }
//! ```
//! Response: `{ "result": { "items": [ { "id": "...", "ownership": { "owner": "..." } } ] } }`.
//! A missing `result` or `items` is treated as an empty page.

use super::AssetIndexService;
use crate::error::IndexError;
use async_trait::async_trait;
use passboard_common::AssetRecord;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const GET_ASSETS_BY_GROUP: &str = "getAssetsByGroup";

/// Asset index backed by a JSON-RPC endpoint
pub struct DasAssetIndex {
    http_client: Client,
    endpoint: String,
}

impl DasAssetIndex {
    /// Create a client for `endpoint`; `timeout` bounds every page request
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, IndexError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl AssetIndexService for DasAssetIndex {
    async fn fetch_page(
        &self,
        collection: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<AssetRecord>, IndexError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": GET_ASSETS_BY_GROUP,
            "params": {
                "groupKey": "collection",
                "groupValue": collection,
                "page": page,
                "limit": limit,
            }
        });

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Network(format!("Asset index request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IndexError::Api { status, body });
        }

        let payload: RpcResponse = response.json().await.map_err(|e| {
            IndexError::Parse(format!("Failed to parse asset index response: {}", e))
        })?;

        if let Some(error) = payload.error {
            return Err(IndexError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let items = payload.result.map(|r| r.items).unwrap_or_default();
        debug!(page, items = items.len(), "Decoded getAssetsByGroup page");

        Ok(items
            .into_iter()
            .map(|asset| AssetRecord::new(asset.id, asset.ownership.owner))
            .collect())
    }
}

// ============================================================================
// JSON-RPC Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<AssetPage>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct AssetPage {
    #[serde(default)]
    items: Vec<DasAsset>,
}

#[derive(Debug, Deserialize)]
struct DasAsset {
    id: String,
    ownership: DasOwnership,
}

#[derive(Debug, Deserialize)]
struct DasOwnership {
    owner: String,
}
