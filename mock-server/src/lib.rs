use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

const RECORD_TYPES: [&str; 9] = ["A", "AAAA", "CNAME", "MX", "NS", "SOA", "SRV", "TXT", "CAA"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

#[derive(Deserialize)]
pub struct RecordValue {
    pub data: String,
    pub ttl: Option<u32>,
}

/// Records keyed by domain name.
pub type Db = Arc<RwLock<HashMap<String, Vec<DnsRecord>>>>;

/// GoDaddy-style error: `{"code": .., "message": ..}`.
pub struct ApiFailure {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"code": self.code, "message": self.message}))).into_response()
    }
}

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over a pre-populated store.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/v1/domains/{domain}/records", get(list_records).patch(add_records))
        .route(
            "/v1/domains/{domain}/records/{type}/{name}",
            get(get_records).put(replace_records).delete(delete_records),
        )
        .layer(middleware::from_fn(require_sso_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Accept only `sso-key <key>:<secret>` with both parts non-empty.
async fn require_sso_key(request: Request, next: Next) -> Response {
    let valid = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("sso-key "))
        .and_then(|v| v.split_once(':'))
        .is_some_and(|(key, secret)| !key.is_empty() && !secret.is_empty());

    if !valid {
        tracing::debug!(uri = %request.uri(), "rejecting request without sso-key");
        return ApiFailure::new(
            StatusCode::UNAUTHORIZED,
            "UNABLE_TO_AUTHENTICATE",
            "Unable to authenticate your request",
        )
        .into_response();
    }
    next.run(request).await
}

fn check_type(record_type: &str) -> Result<(), ApiFailure> {
    if RECORD_TYPES.contains(&record_type) {
        Ok(())
    } else {
        Err(ApiFailure::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_TYPE",
            format!("unsupported record type {record_type}"),
        ))
    }
}

/// Bodies arrive without a content type, so they are parsed by hand.
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiFailure> {
    serde_json::from_slice(body)
        .map_err(|e| ApiFailure::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_BODY", e.to_string()))
}

async fn list_records(State(db): State<Db>, Path(domain): Path<String>) -> Json<Vec<DnsRecord>> {
    let db = db.read().await;
    Json(db.get(&domain).cloned().unwrap_or_default())
}

async fn add_records(
    State(db): State<Db>,
    Path(domain): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiFailure> {
    let records: Vec<DnsRecord> = parse_body(&body)?;
    for record in &records {
        check_type(&record.record_type)?;
    }
    db.write().await.entry(domain).or_default().extend(records);
    Ok(StatusCode::OK)
}

async fn get_records(
    State(db): State<Db>,
    Path((domain, record_type, name)): Path<(String, String, String)>,
) -> Result<Json<Vec<DnsRecord>>, ApiFailure> {
    check_type(&record_type)?;
    let db = db.read().await;
    let matching = db
        .get(&domain)
        .map(|records| {
            records
                .iter()
                .filter(|r| r.record_type == record_type && r.name == name)
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(matching))
}

async fn replace_records(
    State(db): State<Db>,
    Path((domain, record_type, name)): Path<(String, String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiFailure> {
    check_type(&record_type)?;
    let values: Vec<RecordValue> = parse_body(&body)?;
    if values.is_empty() {
        return Err(ApiFailure::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_BODY",
            "at least one record value is required",
        ));
    }

    let mut db = db.write().await;
    let records = db.entry(domain).or_default();
    records.retain(|r| !(r.record_type == record_type && r.name == name));
    records.extend(values.into_iter().map(|v| DnsRecord {
        record_type: record_type.clone(),
        name: name.clone(),
        data: v.data,
        ttl: v.ttl,
        priority: None,
    }));
    Ok(StatusCode::OK)
}

async fn delete_records(
    State(db): State<Db>,
    Path((domain, record_type, name)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiFailure> {
    check_type(&record_type)?;
    let not_found = || {
        ApiFailure::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("no {record_type} record named {name}"),
        )
    };
    let mut db = db.write().await;
    let records = db.get_mut(&domain).ok_or_else(not_found)?;
    let before = records.len();
    records.retain(|r| !(r.record_type == record_type && r.name == name));
    if records.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
