/// HTTP catalog client backed by reqwest
use crate::{
    api::{CatalogAccount, CatalogApi, PublicKeyRecord},
    config::KatalogConfig,
    error::{ApiError, KatalogError, KatalogResult},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Path prefix of the catalog API on the Fiks host
const API_PATH: &str = "/svarinn2/katalog/api/v1";

/// Catalog client speaking JSON over HTTP
#[derive(Clone)]
pub struct HttpCatalogApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogApi {
    /// Create a client from loaded configuration
    pub fn new(config: &KatalogConfig) -> KatalogResult<Self> {
        config.validate()?;
        Self::with_base_url(
            config.base_url(),
            config.timeout(),
            &config.user_agent,
        )
    }

    /// Create a client for an explicit base URL, e.g. `https://api.fiks.ks.no:443`
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> KatalogResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| KatalogError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PATH, path)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn lookup(
        &self,
        key: &str,
        message_type: &str,
        security_level: u32,
    ) -> Result<CatalogAccount, ApiError> {
        let url = self.endpoint("/lookup");

        debug!("Catalog lookup {} (type {}, level {})", key, message_type, security_level);

        let response = self
            .http_client
            .get(&url)
            .query(&[("identifikator", key), ("meldingType", message_type)])
            .query(&[("sikkerhetsniva", security_level)])
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Catalog lookup request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        read_json(response).await
    }

    async fn get_public_key(&self, account_id: Uuid) -> Result<PublicKeyRecord, ApiError> {
        let url = self.endpoint(&format!("/kontoer/{}/offentligNokkel", account_id));

        debug!("Fetching public key for account {}", account_id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Public key request failed: {}", e)))?;

        read_json(response).await
    }
}

/// Decode a JSON body, mapping non-success statuses to [`ApiError::Status`]
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(format!("Failed to read catalog response: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Decode(format!("Invalid catalog response: {}", e)))
}
