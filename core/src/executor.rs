//! Executes a single request against the registrar API.
//!
//! # Design
//! `execute` is a linear pipeline that stops at the first failure:
//! validate the method, attach the body and `sso-key` header, send once,
//! drain the body, interpret the status. Validation happens before the
//! transport is touched, so an invalid method never reaches the network.
//!
//! Error bodies are decoded as a flat string-to-string object into a
//! `BTreeMap`, which makes the rendered message sorted by key. Anything else
//! (plain text, nested values, empty body) renders as an empty message.

use std::collections::BTreeMap;
use std::io::Read;

use crate::error::ApiError;
use crate::http::{HttpMethod, RequestDescription};
use crate::transport::{OutboundRequest, Transport, TransportConfig, UreqTransport};

/// Runs `RequestDescription`s through a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor<T = UreqTransport> {
    transport: T,
}

impl RequestExecutor<UreqTransport> {
    pub fn new(config: TransportConfig) -> Self {
        Self::with_transport(UreqTransport::new(config))
    }
}

impl<T: Transport> RequestExecutor<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and return the raw response body on a 2xx status.
    pub fn execute(&self, request: &RequestDescription) -> Result<Vec<u8>, ApiError> {
        let method = validate_method(&request.method)?;
        let authorization = request.credentials.authorization();

        let outbound = OutboundRequest {
            method,
            url: &request.url,
            authorization: &authorization,
            body: request.body.as_deref(),
        };

        tracing::debug!(target: "godaddy::http", method = %method, url = %request.url, "sending request");
        let response = self.transport.send(&outbound).map_err(ApiError::Transport)?;
        let status = response.status;

        // The body stream is dropped at the end of this call on every path.
        let payload = drain(response.body)?;
        tracing::debug!(target: "godaddy::http", method = %method, url = %request.url, status, "response received");

        check_status(status, &payload)?;
        Ok(payload)
    }
}

fn validate_method(method: &str) -> Result<HttpMethod, ApiError> {
    method.parse().map_err(|_| ApiError::InvalidMethod {
        method: method.to_string(),
    })
}

fn drain(mut body: Box<dyn Read>) -> Result<Vec<u8>, ApiError> {
    let mut payload = Vec::new();
    body.read_to_end(&mut payload)?;
    Ok(payload)
}

/// Anything outside 200..=299 is a failure.
fn check_status(status: u16, body: &[u8]) -> Result<(), ApiError> {
    if status <= 199 || status >= 300 {
        return Err(ApiError::Status {
            status,
            message: error_message(body),
        });
    }
    Ok(())
}

/// Render a flat JSON object as `key:value,key:value`. Bodies of any other
/// shape produce an empty string.
fn error_message(body: &[u8]) -> String {
    let fields: BTreeMap<String, String> = serde_json::from_slice(body).unwrap_or_default();
    fields
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(",")
}
