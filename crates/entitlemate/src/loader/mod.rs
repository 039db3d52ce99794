//! Fetches the entitlement record set and normalizes it at the boundary.

mod file;
mod http;

pub use file::{parse_csv, CsvEntitlementSource, JsonFileEntitlementSource};
pub use http::HttpEntitlementSource;

use crate::catalog::{json_kind, normalize_records, EntitlementRecord};
use crate::config::SourceConfig;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Received data is not an array (found {found})")]
    NotAnArray { found: &'static str },
    #[error("failed to read entitlement export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid entitlement CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Anything able to produce the full record set in one shot.
pub trait EntitlementSource: Send + Sync {
    /// Human readable origin, used in logs and page footers.
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<Vec<EntitlementRecord>, FetchError>> + Send;
}

/// Decodes a response body that must be a JSON array of entitlement objects.
pub fn decode_records(body: &[u8]) -> Result<Vec<EntitlementRecord>, FetchError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Array(items) => Ok(normalize_records(items)),
        other => Err(FetchError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

/// The concrete sources the binaries can be pointed at.
#[derive(Debug)]
pub enum CatalogSource {
    Http(HttpEntitlementSource),
    JsonFile(JsonFileEntitlementSource),
    Csv(CsvEntitlementSource),
}

impl CatalogSource {
    /// Local exports take precedence over the configured API.
    pub fn select(
        config: &SourceConfig,
        csv: Option<PathBuf>,
        json: Option<PathBuf>,
    ) -> Result<Self, FetchError> {
        if let Some(path) = csv {
            return Ok(Self::Csv(CsvEntitlementSource::new(path)));
        }
        if let Some(path) = json {
            return Ok(Self::JsonFile(JsonFileEntitlementSource::new(path)));
        }
        Ok(Self::Http(HttpEntitlementSource::new(config)?))
    }
}

impl EntitlementSource for CatalogSource {
    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::JsonFile(source) => source.describe(),
            Self::Csv(source) => source.describe(),
        }
    }

    async fn fetch(&self) -> Result<Vec<EntitlementRecord>, FetchError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::JsonFile(source) => source.fetch().await,
            Self::Csv(source) => source.fetch().await,
        }
    }
}
