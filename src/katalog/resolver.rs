/// Lookup Resolver - Resolves identifiers to catalog accounts
use crate::{
    api::{CatalogAccount, CatalogApi},
    error::{ApiError, KatalogResult},
    model::{Account, AccountId, LookupRequest, OrganizationId},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves lookup requests through the catalog
#[derive(Clone)]
pub struct LookupResolver {
    api: Arc<dyn CatalogApi>,
}

impl LookupResolver {
    /// Create a new lookup resolver
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// Look up the account accepting `request`
    ///
    /// Returns `Ok(None)` when the catalog has no matching account. Every
    /// other catalog failure is returned as is.
    pub async fn lookup(&self, request: &LookupRequest) -> KatalogResult<Option<Account>> {
        let key = request.identifier().lookup_key();

        debug!(
            "Looking up {} for message type {} at security level {}",
            key,
            request.message_type(),
            request.security_level()
        );

        match self
            .api
            .lookup(&key, request.message_type(), request.security_level())
            .await
        {
            Ok(record) => {
                let account = Account::from(record);
                info!("Resolved {} to account {}", key, account.account_id);
                Ok(Some(account))
            }
            Err(ApiError::NotFound) => {
                debug!("No account found for {}", key);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl From<CatalogAccount> for Account {
    fn from(record: CatalogAccount) -> Self {
        Account {
            account_id: AccountId::new(record.account_id),
            account_name: record.account_name,
            organization_id: OrganizationId::new(record.organization_id),
            organization_name: record.organization_name,
            is_valid_sender: record.status.valid_sender,
            is_valid_recipient: record.status.valid_recipient,
        }
    }
}
