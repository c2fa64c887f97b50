//! The seam between the executor and the network.
//!
//! # Design
//! The executor validates, authenticates and interprets; a `Transport` only
//! performs one round trip and hands back the status plus an unread body
//! stream. Keeping status interpretation out of the transport lets tests
//! substitute a recording double and count calls.
//!
//! `UreqTransport` is the production implementation. Its agent is built once
//! and is safe to share between threads.

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use crate::http::HttpMethod;

/// Error produced by a transport, surfaced to callers unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A validated request ready to go on the wire.
#[derive(Debug, Clone, Copy)]
pub struct OutboundRequest<'a> {
    pub method: HttpMethod,
    pub url: &'a str,
    pub authorization: &'a str,
    pub body: Option<&'a [u8]>,
}

/// Status and undrained body of a response. Dropping it releases the
/// underlying connection.
pub struct TransportResponse {
    pub status: u16,
    pub body: Box<dyn Read>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Read + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

pub trait Transport {
    /// Perform exactly one HTTP round trip. Any status code is a successful
    /// return; only network-level failures are errors.
    fn send(&self, request: &OutboundRequest<'_>) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &OutboundRequest<'_>) -> Result<TransportResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &OutboundRequest<'_>) -> Result<TransportResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &OutboundRequest<'_>) -> Result<TransportResponse, TransportError> {
        (**self).send(request)
    }
}

/// Settings applied to the underlying HTTP agent.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Upper bound on the whole round trip. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        // Non-2xx responses come back as data; the executor interprets them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &OutboundRequest<'_>) -> Result<TransportResponse, TransportError> {
        let url = request.url;
        let auth = request.authorization;

        let result = match (request.method, request.body) {
            (HttpMethod::Get, None) => self.agent.get(url).header("Authorization", auth).call(),
            (HttpMethod::Get, Some(body)) => self
                .agent
                .get(url)
                .header("Authorization", auth)
                .force_send_body()
                .send(body),
            (HttpMethod::Delete, None) => self.agent.delete(url).header("Authorization", auth).call(),
            (HttpMethod::Delete, Some(body)) => self
                .agent
                .delete(url)
                .header("Authorization", auth)
                .force_send_body()
                .send(body),
            (HttpMethod::Post, None) => self.agent.post(url).header("Authorization", auth).send_empty(),
            (HttpMethod::Post, Some(body)) => self.agent.post(url).header("Authorization", auth).send(body),
            (HttpMethod::Put, None) => self.agent.put(url).header("Authorization", auth).send_empty(),
            (HttpMethod::Put, Some(body)) => self.agent.put(url).header("Authorization", auth).send(body),
            (HttpMethod::Patch, None) => self.agent.patch(url).header("Authorization", auth).send_empty(),
            (HttpMethod::Patch, Some(body)) => self.agent.patch(url).header("Authorization", auth).send(body),
        };

        let response = result.map_err(|e| {
            tracing::debug!(target: "godaddy::http", method = %request.method, url = %url, err = %e, "transport error");
            Box::new(e) as TransportError
        })?;

        let status = response.status().as_u16();
        Ok(TransportResponse::new(status, response.into_body().into_reader()))
    }
}
