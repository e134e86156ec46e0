//! REST catalog client configuration
//!
//! Builder-style configuration validated before a client is constructed.

use serde::{Deserialize, Serialize};

use setsync_catalog::error::{CatalogError, CatalogResult};

/// Configuration for the REST catalog client.
#[derive(Clone, Serialize, Deserialize)]
pub struct RestCatalogConfig {
    /// Base URL of the catalog API (e.g. "https://graph.example.com/v19.0").
    pub base_url: String,

    /// Bearer access token, when the deployment uses one.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-request read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Permit plain-http base URLs. Intended for tests against local mocks.
    #[serde(default)]
    pub allow_http: bool,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    30
}

impl RestCatalogConfig {
    /// Create a configuration for `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            allow_http: false,
        }
    }

    /// Set the bearer access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the per-request read timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.read_timeout_secs = secs;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Permit plain-http base URLs (local mock servers).
    #[must_use]
    pub fn with_allow_http(mut self) -> Self {
        self.allow_http = true;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            CatalogError::invalid_configuration(format!("invalid base_url: {e}"))
        })?;

        match parsed.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            scheme => {
                return Err(CatalogError::invalid_configuration(format!(
                    "unsupported scheme '{scheme}' for base_url"
                )));
            }
        }

        if parsed.host_str().is_none() {
            return Err(CatalogError::invalid_configuration("base_url has no host"));
        }

        if self.read_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(CatalogError::invalid_configuration(
                "timeouts must be non-zero",
            ));
        }

        Ok(())
    }
}

// Token never appears in logs.
impl std::fmt::Debug for RestCatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestCatalogConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "***"),
            )
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("read_timeout_secs", &self.read_timeout_secs)
            .field("allow_http", &self.allow_http)
            .finish()
    }
}
