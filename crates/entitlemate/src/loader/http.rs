use super::{decode_records, EntitlementSource, FetchError};
use crate::catalog::EntitlementRecord;
use crate::config::SourceConfig;
use tracing::{debug, info};

/// Reads the record set from the data API with a single GET.
///
/// No retries and no timeout beyond the client default; callers decide when
/// to reload.
#[derive(Debug, Clone)]
pub struct HttpEntitlementSource {
    client: reqwest::Client,
    url: String,
}

impl HttpEntitlementSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("entitlemate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config.url()))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EntitlementSource for HttpEntitlementSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<EntitlementRecord>, FetchError> {
        debug!(url = %self.url, "fetching entitlements");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let records = decode_records(&body)?;
        info!(url = %self.url, records = records.len(), "entitlements loaded");

        Ok(records)
    }
}
