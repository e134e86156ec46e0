//! Catalog client error types
//!
//! Error definitions with transient/permanent classification, so callers
//! can tell a lookup that merely failed from a definitive answer.

use thiserror::Error;

/// Error that can occur talking to the remote catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    // Transport errors (transient)
    /// Failed to reach the remote catalog at all.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Request timed out before the remote side answered.
    #[error("request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Remote catalog answered but is temporarily unable to serve (5xx).
    #[error("catalog unavailable: {message}")]
    TargetUnavailable { message: String },

    /// Remote side asked us to back off.
    #[error("rate limited by the catalog API")]
    RateLimited { retry_after_secs: Option<u64> },

    // Auth errors (permanent)
    /// Access token rejected.
    #[error("authentication failed: access token rejected")]
    AuthenticationFailed,

    /// Token valid, but not allowed to perform the operation.
    #[error("permission denied for {operation}")]
    PermissionDenied { operation: String },

    // Request errors (permanent)
    /// The catalog API rejected the request outright.
    #[error("catalog API rejected request ({status}): {message}")]
    ApiRejected { status: u16, message: String },

    /// Payload failed local validation before it was ever sent.
    #[error("invalid payload: {message}")]
    InvalidPayload { message: String },

    /// Client configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Response body could not be decoded.
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl CatalogError {
    /// Check if this error is transient and the operation may succeed later.
    ///
    /// A transient read failure must never be treated as "not found" —
    /// callers use this classification to decide, not to retry inline.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CatalogError::ConnectionFailed { .. }
                | CatalogError::Timeout { .. }
                | CatalogError::TargetUnavailable { .. }
                | CatalogError::RateLimited { .. }
        )
    }

    /// Check if this error is permanent and will not resolve on its own.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Get an error code for classification in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            CatalogError::Timeout { .. } => "TIMEOUT",
            CatalogError::TargetUnavailable { .. } => "TARGET_UNAVAILABLE",
            CatalogError::RateLimited { .. } => "RATE_LIMITED",
            CatalogError::AuthenticationFailed => "AUTH_FAILED",
            CatalogError::PermissionDenied { .. } => "PERMISSION_DENIED",
            CatalogError::ApiRejected { .. } => "API_REJECTED",
            CatalogError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            CatalogError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            CatalogError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }

    // Convenience constructors

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        CatalogError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CatalogError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an API rejection error.
    pub fn api_rejected(status: u16, message: impl Into<String>) -> Self {
        CatalogError::ApiRejected {
            status,
            message: message.into(),
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        CatalogError::TargetUnavailable {
            message: message.into(),
        }
    }

    /// Create an invalid payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        CatalogError::InvalidPayload {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        CatalogError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        CatalogError::Serialization {
            message: message.into(),
        }
    }
}

/// Result type for catalog client operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
