//! Update the value of an existing DNS record.
//!
//! Configuration comes from the environment:
//! `GODADDY_API_KEY`, `GODADDY_API_SECRET`, `GODADDY_DOMAIN`,
//! `GODADDY_RECORD_NAME`, `GODADDY_RECORD_VALUE`, and optionally
//! `GODADDY_RECORD_TYPE` (default `A`), `GODADDY_ENV`
//! (`production` | `development`), `GODADDY_BASE_URL` and
//! `GODADDY_TIMEOUT_SECS`. The domain must be owned by the account.

use std::process::ExitCode;
use std::time::Duration;

use godaddy_core::{Api, Options, TransportConfig};
use tracing_subscriber::EnvFilter;

fn var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("missing environment variable {name}"))
}

fn run() -> Result<(), String> {
    let mut transport = TransportConfig::default();
    if let Ok(secs) = std::env::var("GODADDY_TIMEOUT_SECS") {
        let secs: u64 = secs
            .parse()
            .map_err(|_| format!("GODADDY_TIMEOUT_SECS is not a number: {secs}"))?;
        transport = transport.with_timeout(Duration::from_secs(secs));
    }
    let options = Options::new(&var("GODADDY_API_KEY")?, &var("GODADDY_API_SECRET")?)
        .with_transport_config(transport);

    let api = match (std::env::var("GODADDY_BASE_URL"), std::env::var("GODADDY_ENV").as_deref()) {
        (Ok(url), _) => Api::with_base_url(&url, options),
        (Err(_), Ok("development")) => Api::development(options),
        (Err(_), Ok("production") | Err(_)) => Api::production(options),
        (Err(_), Ok(other)) => return Err(format!("unknown GODADDY_ENV: {other}")),
    };

    let domain = var("GODADDY_DOMAIN")?;
    let record_type = std::env::var("GODADDY_RECORD_TYPE").unwrap_or_else(|_| "A".to_string());
    let name = var("GODADDY_RECORD_NAME")?;
    let value = var("GODADDY_RECORD_VALUE")?;

    tracing::info!(base_url = api.base_url(), %domain, %record_type, %name, "updating record");
    api.v1()
        .domain(&domain)
        .records()
        .set_value(&record_type, &name, &value)
        .map_err(|e| format!("update failed: {e}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => {
            println!("Updated record successfully");
            ExitCode::SUCCESS
        }
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
