/// Catalog lookups
///
/// Resolves message recipients to catalog accounts and fetches the
/// certificates those accounts publish.

pub mod resolver;
pub mod retriever;

pub use resolver::LookupResolver;
pub use retriever::PublicKeyRetriever;

use crate::{
    api::{CatalogApi, HttpCatalogApi},
    certificate::PublicKeyHandle,
    config::KatalogConfig,
    error::KatalogResult,
    model::{Account, AccountId, LookupRequest},
};
use std::sync::Arc;

/// Entry point bundling account lookup and key retrieval over one catalog client
#[derive(Clone)]
pub struct KatalogHandler {
    resolver: LookupResolver,
    retriever: PublicKeyRetriever,
}

impl KatalogHandler {
    /// Create a handler over any catalog API implementation
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            resolver: LookupResolver::new(Arc::clone(&api)),
            retriever: PublicKeyRetriever::new(api),
        }
    }

    /// Create a handler talking to the configured catalog over HTTP
    pub fn from_config(config: &KatalogConfig) -> KatalogResult<Self> {
        let api = HttpCatalogApi::new(config)?;
        Ok(Self::new(Arc::new(api)))
    }

    /// Look up the account accepting `request`
    pub async fn lookup(&self, request: &LookupRequest) -> KatalogResult<Option<Account>> {
        self.resolver.lookup(request).await
    }

    /// Fetch and parse the certificate for `account_id`
    pub async fn get_public_key(&self, account_id: AccountId) -> KatalogResult<PublicKeyHandle> {
        self.retriever.get_public_key(account_id).await
    }

    pub fn resolver(&self) -> &LookupResolver {
        &self.resolver
    }

    pub fn retriever(&self) -> &PublicKeyRetriever {
        &self.retriever
    }
}
