//! Certificate validation utilities.
//!
//! One level only: a leaf is checked directly against its issuing CA.
//! Revocation and intermediate chains are out of scope.

use chrono::Utc;
use x509_parser::prelude::*;

use crate::error::{Error, Result};
use crate::types::Certificate;

/// Validates a certificate against its issuing CA certificate.
///
/// Checks, in order: the certificate is within its validity window, its
/// issuer matches the CA's subject, its authority key identifier matches
/// the CA's subject key identifier, and its signature verifies against the
/// CA's public key.
///
/// # Errors
///
/// Returns an error if any check fails.
pub fn validate_certificate(cert: &Certificate, ca_cert: &Certificate) -> Result<()> {
    if is_expired(cert) {
        return Err(Error::Expired);
    }

    if is_not_yet_valid(cert) {
        return Err(Error::NotYetValid);
    }

    if cert.issuer() != ca_cert.common_name() {
        return Err(Error::Validation(format!(
            "issuer '{}' does not match CA subject '{}'",
            cert.issuer(),
            ca_cert.common_name()
        )));
    }

    if let (Some(aki), Some(ski)) = (cert.authority_key_id(), ca_cert.subject_key_id()) {
        if aki != ski {
            return Err(Error::Validation(
                "authority key identifier does not match the CA's subject key identifier".into(),
            ));
        }
    }

    verify_signature(cert, ca_cert)
}

/// Checks if a certificate is expired.
#[must_use]
pub fn is_expired(cert: &Certificate) -> bool {
    cert.not_after() < Utc::now()
}

/// Checks if a certificate is not yet valid.
#[must_use]
pub fn is_not_yet_valid(cert: &Certificate) -> bool {
    cert.not_before() > Utc::now()
}

/// Checks if a certificate is currently valid.
#[must_use]
pub fn is_valid_now(cert: &Certificate) -> bool {
    !is_expired(cert) && !is_not_yet_valid(cert)
}

/// Verifies that a certificate was signed by the given issuer.
fn verify_signature(cert: &Certificate, issuer: &Certificate) -> Result<()> {
    let (_, parsed_cert) = X509Certificate::from_der(cert.der())
        .map_err(|e| Error::Parse(format!("failed to parse certificate: {e}")))?;

    let (_, parsed_issuer) = X509Certificate::from_der(issuer.der())
        .map_err(|e| Error::Parse(format!("failed to parse issuer certificate: {e}")))?;

    parsed_cert
        .verify_signature(Some(parsed_issuer.public_key()))
        .map_err(|e| {
            Error::SignatureVerification(format!(
                "signature verification failed for '{}': {e:?}",
                cert.common_name()
            ))
        })?;

    Ok(())
}
