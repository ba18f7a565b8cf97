/// Domain model for catalog lookups
///
/// Identifiers, lookup requests and the accounts they resolve to.
use crate::error::{KatalogError, KatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Separator between identifier kind and value in a lookup key
pub const LOOKUP_KEY_SEPARATOR: char = '.';

/// Registry an identifier was issued by
///
/// The string form of each variant is sent to the catalog as-is and must
/// match the tokens the catalog expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// Organization number from the central coordinating register
    #[serde(rename = "ORG_NO")]
    OrgNo,
    /// National person number
    #[serde(rename = "FNR")]
    Fnr,
    /// Organization id assigned by the catalog itself
    #[serde(rename = "FIKS_ORG_ID")]
    FiksOrgId,
    /// Free-form addressing
    #[serde(rename = "ADRESSE")]
    Adresse,
}

impl IdentifierKind {
    /// Every known kind
    pub const ALL: [IdentifierKind; 4] = [
        IdentifierKind::OrgNo,
        IdentifierKind::Fnr,
        IdentifierKind::FiksOrgId,
        IdentifierKind::Adresse,
    ];

    /// Wire token for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::OrgNo => "ORG_NO",
            IdentifierKind::Fnr => "FNR",
            IdentifierKind::FiksOrgId => "FIKS_ORG_ID",
            IdentifierKind::Adresse => "ADRESSE",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = KatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdentifierKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| KatalogError::Validation(format!("Unknown identifier kind: {}", s)))
    }
}

/// A tagged identifier, e.g. `ORG_NO` + `999999999`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    kind: IdentifierKind,
    value: String,
}

impl Identifier {
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Composite key sent to the catalog: `<KIND>.<value>`
    pub fn lookup_key(&self) -> String {
        format!("{}{}{}", self.kind.as_str(), LOOKUP_KEY_SEPARATOR, self.value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lookup_key())
    }
}

/// Account lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    identifier: Identifier,
    message_type: String,
    security_level: u32,
}

impl LookupRequest {
    /// Start building a lookup request
    pub fn builder() -> LookupRequestBuilder {
        LookupRequestBuilder::default()
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn security_level(&self) -> u32 {
        self.security_level
    }
}

/// Builder for lookup requests
#[derive(Debug, Default)]
pub struct LookupRequestBuilder {
    identifier: Option<Identifier>,
    message_type: Option<String>,
    security_level: Option<u32>,
}

impl LookupRequestBuilder {
    /// Set the identifier to look up
    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Set the message type the recipient must accept
    pub fn message_type(mut self, message_type: impl Into<String>) -> Self {
        self.message_type = Some(message_type.into());
        self
    }

    /// Set the required security level
    pub fn security_level(mut self, security_level: u32) -> Self {
        self.security_level = Some(security_level);
        self
    }

    /// Build the request
    pub fn build(self) -> KatalogResult<LookupRequest> {
        let identifier = self.identifier.ok_or_else(|| {
            KatalogError::Validation("Identifier is required for lookup".to_string())
        })?;

        if identifier.value().is_empty() {
            return Err(KatalogError::Validation(
                "Identifier value cannot be empty".to_string(),
            ));
        }

        let message_type = self.message_type.ok_or_else(|| {
            KatalogError::Validation("Message type is required for lookup".to_string())
        })?;

        if message_type.trim().is_empty() {
            return Err(KatalogError::Validation(
                "Message type cannot be blank".to_string(),
            ));
        }

        let security_level = self.security_level.ok_or_else(|| {
            KatalogError::Validation("Security level is required for lookup".to_string())
        })?;

        if security_level < 1 {
            return Err(KatalogError::Validation(
                "Security level must be at least 1".to_string(),
            ));
        }

        Ok(LookupRequest {
            identifier,
            message_type,
            security_level,
        })
    }
}

/// Catalog account id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Id of the organization owning an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(Uuid);

impl OrganizationId {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An account registered in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: AccountId,
    pub account_name: String,
    pub organization_id: OrganizationId,
    pub organization_name: String,
    pub is_valid_sender: bool,
    pub is_valid_recipient: bool,
}
