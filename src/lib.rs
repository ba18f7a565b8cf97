/// SvarInn Katalog - catalog client for SvarInn messaging
///
/// Resolves message recipients (organization numbers, person numbers and
/// other registry identifiers) to catalog accounts, and retrieves the
/// X.509 certificates those accounts publish for message encryption.

pub mod api;
pub mod certificate;
pub mod config;
pub mod error;
pub mod katalog;
pub mod model;
pub mod telemetry;

pub use api::{AccountStatus, CatalogAccount, CatalogApi, HttpCatalogApi, PublicKeyRecord};
pub use certificate::PublicKeyHandle;
pub use config::KatalogConfig;
pub use error::{ApiError, KatalogError, KatalogResult};
pub use katalog::{KatalogHandler, LookupResolver, PublicKeyRetriever};
pub use model::{
    Account, AccountId, Identifier, IdentifierKind, LookupRequest, LookupRequestBuilder,
    OrganizationId,
};
