//! Error types for the league API client.
//!
//! # Design
//! Every failure surfaced by the gateway is an `ApiError`, and every variant
//! answers the same three questions: what message to show, which HTTP status
//! (if any) caused it, and what parsed body (if any) came with it. Callers
//! branch on `status()` for special cases such as 401 and otherwise just
//! display `message()`.

use serde_json::Value;
use thiserror::Error;

/// Message shown for any transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Is the server running?";

/// A failure below HTTP: connection refused, DNS, timeout, TLS.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

/// Errors returned by the gateway and the typed client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http {
        message: String,
        status: u16,
        body: Option<Value>,
    },

    /// The request never produced an HTTP response.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(#[source] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 2xx body was not JSON, or not the JSON shape we expected.
    #[error("deserialization failed: {message}")]
    Deserialization { message: String, status: Option<u16> },
}

impl ApiError {
    /// Text suitable for showing to a user.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Deserialization { status, .. } => *status,
            ApiError::Network(_) | ApiError::Serialization(_) => None,
        }
    }

    /// Parsed JSON body of a failed response, when it had one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
