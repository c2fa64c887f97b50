//! Blocking client core for the GoDaddy domains API.
//!
//! # Overview
//! `RequestExecutor` runs one `RequestDescription` at a time: it validates
//! the method, sets the `sso-key` authorization header, sends the request
//! through a `Transport`, drains the body and maps non-2xx statuses to
//! `ApiError::Status`. The fluent `Api` chain builds those descriptions.
//!
//! # Design
//! - The executor holds no mutable state; it is `Sync` whenever its
//!   transport is.
//! - `Transport` is the only I/O seam. `UreqTransport` is the default; tests
//!   swap in recording doubles.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod executor;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{Api, Domain, Options, Records, V1, DEVELOPMENT_URL, PRODUCTION_URL};
pub use error::ApiError;
pub use executor::RequestExecutor;
pub use http::{Credentials, HttpMethod, RequestDescription};
pub use transport::{OutboundRequest, Transport, TransportConfig, TransportError, TransportResponse, UreqTransport};
pub use types::{DnsRecord, RecordValue};
