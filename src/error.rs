/// Unified error types for the SvarInn catalog client
use thiserror::Error;

/// Failures reported by a catalog API implementation
///
/// `NotFound` is only meaningful for account lookups, where the resolver
/// turns it into an empty result. Every other variant is an infrastructure
/// failure and is handed to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The catalog has no account for the lookup key
    #[error("Not found")]
    NotFound,

    /// The request could not be sent or the connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The catalog answered with a non-success status
    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Main error type for the catalog client
#[derive(Error, Debug)]
pub enum KatalogError {
    /// Catalog API errors, passed through unchanged
    #[error("Catalog API error: {0}")]
    Api(#[from] ApiError),

    /// Key material returned by the catalog is not a valid certificate
    #[error("Certificate parse error: {0}")]
    CertificateParse(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KatalogError {
    /// True when the remote service (or the path to it) failed
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, KatalogError::Api(_))
    }

    /// True when the catalog answered but the key material was unusable
    pub fn is_certificate(&self) -> bool {
        matches!(self, KatalogError::CertificateParse(_))
    }

    /// The underlying catalog error, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            KatalogError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for catalog operations
pub type KatalogResult<T> = Result<T, KatalogError>;
