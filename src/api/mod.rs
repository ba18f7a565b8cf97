/// Catalog API
///
/// The remote catalog is consumed through the [`CatalogApi`] trait so that
/// any client (the bundled HTTP client, a test double, a generated stub)
/// can back the resolver and the key retriever.

pub mod http;

pub use http::HttpCatalogApi;

use crate::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Remote catalog operations
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Look up an account by composite key, message type and security level
    ///
    /// Absence is reported as [`ApiError::NotFound`].
    async fn lookup(
        &self,
        key: &str,
        message_type: &str,
        security_level: u32,
    ) -> Result<CatalogAccount, ApiError>;

    /// Fetch the public key record registered for an account
    async fn get_public_key(&self, account_id: Uuid) -> Result<PublicKeyRecord, ApiError>;
}

/// Account record as returned by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAccount {
    #[serde(rename = "kontoId")]
    pub account_id: Uuid,
    #[serde(rename = "kontoNavn")]
    pub account_name: String,
    #[serde(rename = "fiksOrgId")]
    pub organization_id: Uuid,
    #[serde(rename = "fiksOrgNavn")]
    pub organization_name: String,
    pub status: AccountStatus,
}

/// Sender/recipient status of a catalog account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    #[serde(rename = "gyldigAvsender")]
    pub valid_sender: bool,
    #[serde(rename = "gyldigMottaker")]
    pub valid_recipient: bool,
}

/// Public key record as returned by the catalog
///
/// `key_material` holds the certificate, normally PEM text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyRecord {
    #[serde(rename = "nokkel")]
    pub key_material: String,
    pub serial: String,
    #[serde(rename = "issuerDN")]
    pub issuer_dn: String,
    #[serde(rename = "subjectDN")]
    pub subject_dn: String,
    #[serde(rename = "validFrom")]
    pub valid_from: DateTime<Utc>,
    #[serde(rename = "validTo")]
    pub valid_to: DateTime<Utc>,
}
