/// Public Key Retriever - Fetches and parses account certificates
use crate::{
    api::{CatalogApi, PublicKeyRecord},
    certificate::PublicKeyHandle,
    error::KatalogResult,
    model::AccountId,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Retrieves the public key certificate registered for an account
///
/// Nothing is cached; each call fetches and parses the certificate again.
#[derive(Clone)]
pub struct PublicKeyRetriever {
    api: Arc<dyn CatalogApi>,
}

impl PublicKeyRetriever {
    /// Create a new public key retriever
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// Fetch and parse the certificate for `account_id`
    ///
    /// Catalog failures come back as [`KatalogError::Api`] unchanged.
    /// Unparseable key material is [`KatalogError::CertificateParse`].
    ///
    /// [`KatalogError::Api`]: crate::error::KatalogError::Api
    /// [`KatalogError::CertificateParse`]: crate::error::KatalogError::CertificateParse
    pub async fn get_public_key(&self, account_id: AccountId) -> KatalogResult<PublicKeyHandle> {
        let record = self.api.get_public_key(account_id.uuid()).await?;

        debug!(
            "Received key material for account {} (serial {})",
            account_id, record.serial
        );

        let handle = PublicKeyHandle::from_key_material(&record.key_material)?;
        check_advertised_metadata(account_id, &record, &handle);

        Ok(handle)
    }
}

/// Log disagreements between the catalog's metadata and the certificate
fn check_advertised_metadata(account_id: AccountId, record: &PublicKeyRecord, handle: &PublicKeyHandle) {
    if !handle.serial_matches(&record.serial) {
        warn!(
            "Certificate serial {} for account {} does not match advertised serial {}",
            handle.serial(),
            account_id,
            record.serial
        );
    }

    if record.valid_from != handle.not_before() || record.valid_to != handle.not_after() {
        warn!(
            "Certificate validity {} - {} for account {} differs from advertised {} - {}",
            handle.not_before(),
            handle.not_after(),
            account_id,
            record.valid_from,
            record.valid_to
        );
    }
}
