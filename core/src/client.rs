//! Fluent entry point: API root → version → domain → records.
//!
//! # Design
//! Each step only narrows the URL. The leaf `Records` methods build a
//! `RequestDescription` and run it through the shared `RequestExecutor`;
//! nothing here touches the network directly. Every step borrows the `Api`,
//! so credentials are held in one place.

use crate::error::ApiError;
use crate::executor::RequestExecutor;
use crate::http::{Credentials, RequestDescription};
use crate::transport::{Transport, TransportConfig, UreqTransport};
use crate::types::{DnsRecord, RecordValue};

pub const PRODUCTION_URL: &str = "https://api.godaddy.com";
pub const DEVELOPMENT_URL: &str = "https://api.ote-godaddy.com";

/// Credentials plus the settings for the HTTP transport. Production and
/// development keys are not interchangeable.
#[derive(Debug, Clone)]
pub struct Options {
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

impl Options {
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
            transport: TransportConfig::default(),
        }
    }

    pub fn with_transport_config(mut self, config: TransportConfig) -> Self {
        self.transport = config;
        self
    }
}

/// Root of the fluent chain, bound to one environment.
#[derive(Debug, Clone)]
pub struct Api<T = UreqTransport> {
    base_url: String,
    credentials: Credentials,
    executor: RequestExecutor<T>,
}

impl Api<UreqTransport> {
    pub fn production(options: Options) -> Self {
        Self::with_base_url(PRODUCTION_URL, options)
    }

    pub fn development(options: Options) -> Self {
        Self::with_base_url(DEVELOPMENT_URL, options)
    }

    /// Target any server speaking the same API, e.g. a local mock.
    pub fn with_base_url(base_url: &str, options: Options) -> Self {
        let transport = UreqTransport::new(options.transport);
        Self::with_transport(base_url, options.credentials, transport)
    }
}

impl<T: Transport> Api<T> {
    pub fn with_transport(base_url: &str, credentials: Credentials, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            executor: RequestExecutor::with_transport(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    pub fn v1(&self) -> V1<'_, T> {
        V1 { api: self }
    }

    fn send(&self, method: &str, url: String, body: Option<Vec<u8>>) -> Result<Vec<u8>, ApiError> {
        let mut request = RequestDescription::new(method, url, self.credentials.clone());
        request.body = body;
        self.executor.execute(&request)
    }
}

/// Version 1 of the API.
#[derive(Debug, Clone, Copy)]
pub struct V1<'a, T> {
    api: &'a Api<T>,
}

impl<'a, T: Transport> V1<'a, T> {
    pub fn url(&self) -> String {
        format!("{}/v1", self.api.base_url)
    }

    pub fn domain(&self, name: &str) -> Domain<'a, T> {
        Domain {
            api: self.api,
            name: name.to_string(),
        }
    }
}

/// A domain owned by the account.
#[derive(Debug, Clone)]
pub struct Domain<'a, T> {
    api: &'a Api<T>,
    name: String,
}

impl<'a, T: Transport> Domain<'a, T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> String {
        format!("{}/v1/domains/{}", self.api.base_url, self.name)
    }

    pub fn records(&self) -> Records<'a, T> {
        Records {
            api: self.api,
            url: format!("{}/records", self.url()),
        }
    }
}

/// DNS records of a domain.
#[derive(Debug, Clone)]
pub struct Records<'a, T> {
    api: &'a Api<T>,
    url: String,
}

impl<T: Transport> Records<'_, T> {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Every record on the domain.
    pub fn list(&self) -> Result<Vec<DnsRecord>, ApiError> {
        let body = self.api.send("GET", self.url.clone(), None)?;
        serde_json::from_slice(&body).map_err(ApiError::Deserialization)
    }

    /// Records matching `record_type` and `name`.
    pub fn get(&self, record_type: &str, name: &str) -> Result<Vec<DnsRecord>, ApiError> {
        let body = self.api.send("GET", self.entry_url(record_type, name), None)?;
        serde_json::from_slice(&body).map_err(ApiError::Deserialization)
    }

    /// Replace the value of an existing record.
    pub fn set_value(&self, record_type: &str, name: &str, value: &str) -> Result<(), ApiError> {
        let values = [RecordValue {
            data: value.to_string(),
            ttl: None,
        }];
        self.replace(record_type, name, &values)
    }

    /// Replace every value of the `record_type`/`name` pair.
    pub fn replace(&self, record_type: &str, name: &str, values: &[RecordValue]) -> Result<(), ApiError> {
        let body = serde_json::to_vec(values).map_err(ApiError::Serialization)?;
        self.api.send("PUT", self.entry_url(record_type, name), Some(body))?;
        Ok(())
    }

    /// Append records without touching existing ones.
    pub fn add(&self, records: &[DnsRecord]) -> Result<(), ApiError> {
        let body = serde_json::to_vec(records).map_err(ApiError::Serialization)?;
        self.api.send("PATCH", self.url.clone(), Some(body))?;
        Ok(())
    }

    pub fn delete(&self, record_type: &str, name: &str) -> Result<(), ApiError> {
        self.api.send("DELETE", self.entry_url(record_type, name), None)?;
        Ok(())
    }

    fn entry_url(&self, record_type: &str, name: &str) -> String {
        format!("{}/{record_type}/{name}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpMethod;
    use crate::transport::{OutboundRequest, TransportError, TransportResponse};

    /// Replies with a canned response and keeps the last request.
    struct Canned {
        status: u16,
        body: &'static str,
        last: Mutex<Option<(HttpMethod, String, Option<Vec<u8>>)>>,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                last: Mutex::new(None),
            }
        }

        fn last(&self) -> (HttpMethod, String, Option<Vec<u8>>) {
            self.last.lock().unwrap().clone().unwrap()
        }
    }

    impl Transport for Canned {
        fn send(&self, request: &OutboundRequest<'_>) -> Result<TransportResponse, TransportError> {
            *self.last.lock().unwrap() = Some((
                request.method,
                request.url.to_string(),
                request.body.map(<[u8]>::to_vec),
            ));
            Ok(TransportResponse::new(self.status, Cursor::new(self.body.as_bytes().to_vec())))
        }
    }

    fn api(transport: &Canned) -> Api<&Canned> {
        Api::with_transport("http://localhost:3000/", Credentials::new("k", "s"), transport)
    }

    #[test]
    fn environments_use_their_base_urls() {
        let opts = Options::new("k", "s");
        assert_eq!(Api::production(opts.clone()).base_url(), "https://api.godaddy.com");
        assert_eq!(Api::development(opts).base_url(), "https://api.ote-godaddy.com");
    }

    #[test]
    fn chain_builds_nested_urls() {
        let transport = Canned::new(200, "[]");
        let api = api(&transport);
        let v1 = api.v1();
        assert_eq!(v1.url(), "http://localhost:3000/v1");
        let domain = v1.domain("example.com");
        assert_eq!(domain.url(), "http://localhost:3000/v1/domains/example.com");
        assert_eq!(
            domain.records().url(),
            "http://localhost:3000/v1/domains/example.com/records"
        );
    }

    #[test]
    fn set_value_puts_single_data_entry() {
        let transport = Canned::new(200, "");
        api(&transport)
            .v1()
            .domain("example.com")
            .records()
            .set_value("A", "www", "3.3.3.3")
            .unwrap();

        let (method, url, body) = transport.last();
        assert_eq!(method, HttpMethod::Put);
        assert_eq!(url, "http://localhost:3000/v1/domains/example.com/records/A/www");
        let body: serde_json::Value = serde_json::from_slice(&body.unwrap()).unwrap();
        assert_eq!(body, serde_json::json!([{"data": "3.3.3.3"}]));
    }

    #[test]
    fn list_sends_no_body_and_parses_records() {
        let transport = Canned::new(200, r#"[{"type":"A","name":"@","data":"1.1.1.1","ttl":600}]"#);
        let records = api(&transport).v1().domain("example.com").records().list().unwrap();

        let (method, _, body) = transport.last();
        assert_eq!(method, HttpMethod::Get);
        assert!(body.is_none());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, "1.1.1.1");
    }

    #[test]
    fn add_patches_record_array() {
        let transport = Canned::new(200, "");
        let record = DnsRecord::new("TXT", "_acme", "token");
        api(&transport)
            .v1()
            .domain("example.com")
            .records()
            .add(&[record.clone()])
            .unwrap();

        let (method, url, body) = transport.last();
        assert_eq!(method, HttpMethod::Patch);
        assert!(url.ends_with("/v1/domains/example.com/records"));
        let sent: Vec<DnsRecord> = serde_json::from_slice(&body.unwrap()).unwrap();
        assert_eq!(sent, vec![record]);
    }

    #[test]
    fn delete_targets_type_and_name() {
        let transport = Canned::new(204, "");
        api(&transport).v1().domain("example.com").records().delete("CNAME", "blog").unwrap();

        let (method, url, body) = transport.last();
        assert_eq!(method, HttpMethod::Delete);
        assert!(url.ends_with("/records/CNAME/blog"));
        assert!(body.is_none());
    }

    #[test]
    fn status_errors_propagate_from_leaf_calls() {
        let transport = Canned::new(404, r#"{"code":"NOT_FOUND","message":"no such record"}"#);
        let err = api(&transport)
            .v1()
            .domain("example.com")
            .records()
            .get("A", "missing")
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "code:NOT_FOUND,message:no such record");
    }

    #[test]
    fn malformed_success_body_is_a_deserialization_error() {
        let transport = Canned::new(200, "not json");
        let err = api(&transport).v1().domain("example.com").records().list().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
