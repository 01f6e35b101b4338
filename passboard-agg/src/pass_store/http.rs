//! HTTP pass store client
//!
//! # API Reference
//! - `GET {base}/pass/{asset}` → pass state (camelCase JSON)
//! - `GET {base}/program/{program}` → program metadata (camelCase JSON)
//! - 404 means the pass or program does not exist

use super::PassStore;
use crate::error::PassFetchError;
use async_trait::async_trait;
use passboard_common::{PassState, ProgramMeta};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Pass store reached over HTTP
pub struct HttpPassStore {
    http_client: Client,
    base_url: String,
}

impl HttpPassStore {
    /// Create a client for `base_url`; `timeout` bounds every request
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PassFetchError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PassFetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        address: &str,
    ) -> Result<T, PassFetchError> {
        let url = format!("{}/{}/{}", self.base_url, resource, address);
        debug!(url = %url, "Querying pass store");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| PassFetchError::Network(format!("Pass store request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PassFetchError::NotFound(format!("{} {}", resource, address)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PassFetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            PassFetchError::Parse(format!("Failed to parse {} for {}: {}", resource, address, e))
        })
    }
}

#[async_trait]
impl PassStore for HttpPassStore {
    async fn get_pass(&self, asset_id: &str) -> Result<PassState, PassFetchError> {
        self.get_json("pass", asset_id).await
    }

    async fn get_program(&self, program: &str) -> Result<ProgramMeta, PassFetchError> {
        self.get_json("program", program).await
    }
}
