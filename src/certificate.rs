/// X.509 certificate decoding for catalog key material
///
/// Only structure is checked here. Chain building, revocation and trust
/// anchors are left to the caller.
use crate::error::{KatalogError, KatalogResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use x509_parser::time::ASN1Time;

/// A parsed certificate and the public key it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyHandle {
    der: Vec<u8>,
    serial: String,
    subject: String,
    issuer: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    algorithm_oid: String,
    public_key_info: Vec<u8>,
}

impl PublicKeyHandle {
    /// Parse a DER-encoded certificate
    pub fn from_der(der: Vec<u8>) -> KatalogResult<Self> {
        let mut handle = Self::parse(&der)?;
        handle.der = der;
        Ok(handle)
    }

    fn parse(der: &[u8]) -> KatalogResult<Self> {
        let (rest, cert) = x509_parser::parse_x509_certificate(der)
            .map_err(|e| KatalogError::CertificateParse(format!("Invalid X.509 certificate: {}", e)))?;

        if !rest.is_empty() {
            return Err(KatalogError::CertificateParse(format!(
                "{} trailing bytes after certificate",
                rest.len()
            )));
        }

        Ok(Self {
            der: Vec::new(),
            serial: hex::encode(cert.raw_serial()),
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            not_before: to_utc(cert.validity().not_before)?,
            not_after: to_utc(cert.validity().not_after)?,
            algorithm_oid: cert.public_key().algorithm.algorithm.to_id_string(),
            public_key_info: cert.public_key().raw.to_vec(),
        })
    }

    /// Parse key material as returned by the catalog
    ///
    /// Accepts PEM text (the first `CERTIFICATE` block is used) or bare
    /// base64-encoded DER.
    pub fn from_key_material(key_material: &str) -> KatalogResult<Self> {
        let der = decode_key_material(key_material)?;
        Self::from_der(der)
    }

    /// DER encoding of the whole certificate
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Serial number as lowercase hex
    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// Dotted OID of the public key algorithm
    pub fn algorithm_oid(&self) -> &str {
        &self.algorithm_oid
    }

    /// DER-encoded SubjectPublicKeyInfo
    pub fn public_key_info(&self) -> &[u8] {
        &self.public_key_info
    }

    /// Whether `at` falls inside the validity window (inclusive)
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.not_before <= at && at <= self.not_after
    }

    /// SHA-256 fingerprint of the DER encoding, hex encoded
    pub fn fingerprint_sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.der))
    }

    /// Compare against a serial as advertised by the catalog (`0x523DC4FE`, `523dc4fe`, ...)
    pub fn serial_matches(&self, advertised: &str) -> bool {
        let advertised = advertised.trim();
        let advertised = advertised
            .strip_prefix("0x")
            .or_else(|| advertised.strip_prefix("0X"))
            .unwrap_or(advertised)
            .replace(':', "")
            .to_lowercase();

        advertised.trim_start_matches('0') == self.serial.trim_start_matches('0')
    }
}

fn decode_key_material(key_material: &str) -> KatalogResult<Vec<u8>> {
    let trimmed = key_material.trim();

    if trimmed.is_empty() {
        return Err(KatalogError::CertificateParse(
            "Key material is empty".to_string(),
        ));
    }

    if trimmed.contains("-----BEGIN") {
        let cert = rustls_pemfile::certs(&mut trimmed.as_bytes())
            .next()
            .ok_or_else(|| {
                KatalogError::CertificateParse("No CERTIFICATE block in key material".to_string())
            })?
            .map_err(|e| KatalogError::CertificateParse(format!("Invalid PEM key material: {}", e)))?;
        return Ok(cert.as_ref().to_vec());
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact).map_err(|e| {
        KatalogError::CertificateParse(format!("Key material is neither PEM nor base64 DER: {}", e))
    })
}

fn to_utc(time: ASN1Time) -> KatalogResult<DateTime<Utc>> {
    DateTime::from_timestamp(time.timestamp(), 0).ok_or_else(|| {
        KatalogError::CertificateParse(format!("Certificate time out of range: {}", time))
    })
}
