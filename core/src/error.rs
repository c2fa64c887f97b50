//! Error types for the registrar client.
//!
//! # Design
//! Transport and I/O failures are passed through transparently so callers
//! see the underlying error text unchanged. A failing HTTP status carries
//! the message rendered from the response body, which may be empty; the
//! value is still an error.

use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The method was not one of GET, POST, PUT, PATCH, DELETE. Raised
    /// before any network I/O.
    #[error("invalid request method")]
    InvalidMethod { method: String },

    /// DNS, connect, TLS or timeout failure from the transport.
    #[error(transparent)]
    Transport(TransportError),

    /// Reading the response body failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Non-2xx status. `message` is the comma-joined `key:value` rendering
    /// of the error body and is empty when the body was not a flat object.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A successful response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
