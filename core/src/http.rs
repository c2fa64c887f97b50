//! Request and method types consumed by the executor.
//!
//! # Design
//! A `RequestDescription` is plain data built fresh for every call. The
//! method stays a `String` here because it is caller input; it only becomes
//! an `HttpMethod` once the executor has validated it. Bodies are
//! `Option<Vec<u8>>` so "no body" and "empty body" remain distinct.

use std::fmt;
use std::str::FromStr;

/// The fixed set of methods the registrar API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the exact uppercase method tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod;

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Exact, case-sensitive match. `"get"` and `" GET"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(UnknownMethod)
    }
}

/// API key/secret pair. Production and development keys differ.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Value of the `Authorization` header, used verbatim with no escaping.
    pub fn authorization(&self) -> String {
        format!("sso-key {}:{}", self.key, self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"<redacted>")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Everything needed for one call to the registrar API.
#[derive(Debug, Clone)]
pub struct RequestDescription {
    pub method: String,
    pub url: String,
    pub credentials: Credentials,
    pub body: Option<Vec<u8>>,
}

impl RequestDescription {
    pub fn new(method: impl Into<String>, url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            credentials,
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}
