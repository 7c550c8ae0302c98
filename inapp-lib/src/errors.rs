//! Error types for in-app billing operations.
//!
//! This module provides structured error types for the billing boundary,
//! enabling hosts to map failures onto user-visible states.

use std::fmt;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum InAppErrorCode {
    /// Billing service connection is not established
    NotReady = 2000,
    /// Billing service disconnected mid-operation
    ServiceDisconnected = 2001,
    /// Product, offer or purchase not found
    NotFound = 4000,
    /// Invalid request/data
    InvalidData = 5000,
    /// Serialization error
    Serialization = 5002,
    /// Purchase flow could not be launched
    LaunchFailed = 6000,
    /// User canceled the purchase flow
    UserCanceled = 6001,
    /// Item already owned
    ItemAlreadyOwned = 6002,
    /// Configuration could not be loaded
    Config = 7000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Comprehensive error type for in-app billing operations.
#[derive(Debug)]
pub enum InAppError {
    /// The billing client is not connected.
    NotReady,

    /// The billing service dropped the connection.
    ServiceDisconnected(String),

    /// Resource not found (product, offer, purchase).
    NotFound {
        /// Type of resource (e.g., "product", "offer")
        resource_type: String,
        /// Resource identifier
        identifier: String,
    },

    /// Invalid data provided.
    InvalidData {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// The purchase flow could not be launched.
    LaunchFailed {
        /// Product the flow was launched for
        product_id: String,
        /// Failure reason reported by the billing service
        reason: String,
    },

    /// The user backed out of the purchase flow.
    UserCanceled,

    /// The user already owns the requested item.
    ItemAlreadyOwned(String),

    /// Configuration could not be read.
    Config(String),

    /// Internal/unexpected error.
    Internal(String),
}

impl InAppError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> InAppErrorCode {
        match self {
            Self::NotReady => InAppErrorCode::NotReady,
            Self::ServiceDisconnected(_) => InAppErrorCode::ServiceDisconnected,
            Self::NotFound { .. } => InAppErrorCode::NotFound,
            Self::InvalidData { .. } => InAppErrorCode::InvalidData,
            Self::Serialization(_) => InAppErrorCode::Serialization,
            Self::LaunchFailed { .. } => InAppErrorCode::LaunchFailed,
            Self::UserCanceled => InAppErrorCode::UserCanceled,
            Self::ItemAlreadyOwned(_) => InAppErrorCode::ItemAlreadyOwned,
            Self::Config(_) => InAppErrorCode::Config,
            Self::Internal(_) => InAppErrorCode::Internal,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the billing collaborator may succeed on a later attempt.
    ///
    /// The core itself never retries; this only informs the host.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotReady | Self::ServiceDisconnected(_))
    }

    /// Create a not found error.
    pub fn not_found(resource_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InAppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "billing client is not ready"),
            Self::ServiceDisconnected(msg) => write!(f, "billing service disconnected: {}", msg),
            Self::NotFound {
                resource_type,
                identifier,
            } => {
                write!(f, "{} not found: {}", resource_type, identifier)
            }
            Self::InvalidData { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::LaunchFailed { product_id, reason } => {
                write!(
                    f,
                    "purchase flow for {} failed to launch: {}",
                    product_id, reason
                )
            }
            Self::UserCanceled => write!(f, "user canceled the purchase"),
            Self::ItemAlreadyOwned(product_id) => {
                write!(f, "item already owned: {}", product_id)
            }
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for InAppError {}

impl From<serde_json::Error> for InAppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for InAppError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}
