//! DNS record DTOs for the GoDaddy v1 domains API.
//!
//! # Design
//! Field names follow the API's JSON (`type`, camelCase optionals). The
//! mock-server crate keeps its own copy of these shapes; integration tests
//! catch drift between the two.

use serde::{Deserialize, Serialize};

/// A single DNS record as returned by `GET /v1/domains/{domain}/records`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl DnsRecord {
    pub fn new(record_type: &str, name: &str, data: &str) -> Self {
        Self {
            record_type: record_type.to_string(),
            name: name.to_string(),
            data: data.to_string(),
            ttl: None,
            priority: None,
        }
    }
}

/// One element of the body of `PUT /records/{type}/{name}`, which replaces
/// every value of that type/name pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordValue {
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}
