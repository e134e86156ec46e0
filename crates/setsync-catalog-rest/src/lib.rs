//! # REST Catalog Client
//!
//! HTTP transport for the catalog client framework. Wire this into the
//! sync engine as its `ProductSetOps` implementation:
//!
//! ```ignore
//! use setsync_catalog_rest::{RestCatalogClient, RestCatalogConfig};
//!
//! let config = RestCatalogConfig::new("https://graph.example.com/v19.0")
//!     .with_access_token(token);
//! let client = Arc::new(RestCatalogClient::new(config)?);
//! let reconciler = Reconciler::new(client, identity);
//! ```

pub mod client;
pub mod config;

pub use client::RestCatalogClient;
pub use config::RestCatalogConfig;
