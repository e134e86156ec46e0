//! Sync error types.

use thiserror::Error;

use setsync_catalog::error::CatalogError;

/// Which remote write an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOperation {
    /// Creating a new product set.
    Create,
    /// Replacing an existing product set.
    Update,
    /// Deleting a product set.
    Delete,
}

impl std::fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOperation::Create => write!(f, "create"),
            WriteOperation::Update => write!(f, "update"),
            WriteOperation::Delete => write!(f, "delete"),
        }
    }
}

/// Errors that can occur during reconciliation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Linkage lookup did not return a definitive found/not-found answer.
    ///
    /// Always fatal to the current attempt; treating it as not-found would
    /// risk creating a duplicate remote set.
    #[error("Linkage lookup failed: {source}")]
    Lookup {
        #[source]
        source: CatalogError,
    },

    /// A create/update/delete call was rejected by the remote side.
    #[error("Remote {operation} failed: {source}")]
    Write {
        operation: WriteOperation,
        #[source]
        source: CatalogError,
    },

    /// No catalog identity is configured for this installation.
    #[error("No remote catalog configured: {message}")]
    MissingCatalog { message: String },

    /// The taxonomy store could not be enumerated.
    #[error("Category store error: {message}")]
    Store { message: String },
}

impl SyncError {
    /// Create a lookup error.
    pub fn lookup(source: CatalogError) -> Self {
        Self::Lookup { source }
    }

    /// Create a write error.
    pub fn write(operation: WriteOperation, source: CatalogError) -> Self {
        Self::Write { operation, source }
    }

    /// Create a missing catalog error.
    pub fn missing_catalog(message: impl Into<String>) -> Self {
        Self::MissingCatalog {
            message: message.into(),
        }
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Check if the next pass or event is likely to succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Lookup { source } | SyncError::Write { source, .. } => source.is_transient(),
            SyncError::MissingCatalog { .. } => false,
            SyncError::Store { .. } => true,
        }
    }

    /// Error code for structured log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            SyncError::Lookup { source } | SyncError::Write { source, .. } => source.error_code(),
            SyncError::MissingCatalog { .. } => "MISSING_CATALOG",
            SyncError::Store { .. } => "STORE_ERROR",
        }
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
