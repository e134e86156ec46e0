//! REST catalog client
//!
//! Implements [`ProductSetOps`] against a commerce-graph style HTTP API:
//! sets are nodes under a catalog, written with POST and removed with
//! DELETE, and linkage is resolved by filtering on `retailer_id`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use setsync_catalog::error::{CatalogError, CatalogResult};
use setsync_catalog::ids::{CatalogId, ProductSetId, RetailerId};
use setsync_catalog::payload::ProductSetPayload;
use setsync_catalog::traits::ProductSetOps;

use crate::config::RestCatalogConfig;

/// HTTP implementation of the catalog client.
#[derive(Debug)]
pub struct RestCatalogClient {
    config: RestCatalogConfig,
    client: Client,
}

#[derive(Deserialize)]
struct SetRef {
    id: String,
}

#[derive(Deserialize)]
struct SetList {
    #[serde(default)]
    data: Vec<SetRef>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

impl RestCatalogClient {
    /// Create a client from a validated configuration.
    pub fn new(config: RestCatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.read_timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| {
                CatalogError::invalid_configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> CatalogResult<Response> {
        self.authorize(builder).send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout {
                    timeout_secs: self.config.read_timeout_secs,
                }
            } else {
                CatalogError::connection_failed_with_source("request failed", e)
            }
        })
    }

    /// Map a non-success response onto the error taxonomy.
    async fn error_for(operation: &str, response: Response) -> CatalogError {
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => CatalogError::AuthenticationFailed,
            StatusCode::FORBIDDEN => CatalogError::PermissionDenied {
                operation: operation.to_string(),
            },
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                CatalogError::RateLimited { retry_after_secs }
            }
            s if s.is_server_error() => CatalogError::unavailable(format!(
                "catalog API answered {s} for {operation}"
            )),
            s => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .and_then(|body| body.error)
                    .and_then(|detail| detail.message)
                    .unwrap_or_else(|| format!("{operation} rejected"));
                CatalogError::api_rejected(s.as_u16(), message)
            }
        }
    }
}

#[async_trait]
impl ProductSetOps for RestCatalogClient {
    async fn read(
        &self,
        catalog: &CatalogId,
        retailer: &RetailerId,
    ) -> CatalogResult<Option<ProductSetId>> {
        let filter = json!({ "retailer_id": { "eq": retailer.as_str() } }).to_string();
        let url = self.endpoint(&format!("{catalog}/product_sets"));
        debug!(url = %url, retailer_id = %retailer, "Resolving product set linkage");

        let response = self
            .send(
                self.client
                    .get(&url)
                    .query(&[("filter", filter.as_str()), ("fields", "id"), ("limit", "1")]),
            )
            .await?;

        // A missing catalog node reads as definitively unlinked.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::error_for("read", response).await);
        }

        let list: SetList = response
            .json()
            .await
            .map_err(|e| CatalogError::serialization(format!("bad read response: {e}")))?;

        Ok(list.data.into_iter().next().map(|s| ProductSetId::new(s.id)))
    }

    async fn create(
        &self,
        catalog: &CatalogId,
        payload: &ProductSetPayload,
    ) -> CatalogResult<ProductSetId> {
        let url = self.endpoint(&format!("{catalog}/product_sets"));
        debug!(url = %url, retailer_id = %payload.retailer_id, "Creating product set");

        let response = self.send(self.client.post(&url).json(payload)).await?;

        if !response.status().is_success() {
            return Err(Self::error_for("create", response).await);
        }

        let created: SetRef = response
            .json()
            .await
            .map_err(|e| CatalogError::serialization(format!("bad create response: {e}")))?;

        Ok(ProductSetId::new(created.id))
    }

    async fn update(&self, set: &ProductSetId, payload: &ProductSetPayload) -> CatalogResult<()> {
        let url = self.endpoint(set.as_str());
        debug!(url = %url, set_id = %set, "Replacing product set");

        let response = self.send(self.client.post(&url).json(payload)).await?;

        if !response.status().is_success() {
            return Err(Self::error_for("update", response).await);
        }

        Ok(())
    }

    async fn delete(&self, set: &ProductSetId, allow_live_deletion: bool) -> CatalogResult<()> {
        let url = self.endpoint(set.as_str());
        debug!(url = %url, set_id = %set, allow_live_deletion, "Deleting product set");

        let response = self
            .send(self.client.delete(&url).query(&[(
                "allow_live_product_set_deletion",
                if allow_live_deletion { "true" } else { "false" },
            )]))
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for("delete", response).await);
        }

        Ok(())
    }
}
