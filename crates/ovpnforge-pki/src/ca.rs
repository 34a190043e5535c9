//! PKI facade: root CA, server leaf, and client leaf issuance.

use rcgen::{BasicConstraints, ExtendedKeyUsagePurpose, IsCa, KeyPair, KeyUsagePurpose};

use crate::error::{Error, Result};
use crate::issuer::{self, base_params};
use crate::types::{Certificate, PrivateKey, SubjectProfile};

/// Validity period for every issued certificate (ten years).
pub const CERT_VALIDITY_DAYS: i64 = 3650;

/// Which authentication purpose a leaf certificate serves.
enum LeafRole {
    Server,
    Client,
}

/// Builds a self-signed root CA certificate.
///
/// The CA signs itself with its own freshly generated key, carries a
/// path-length-zero basic constraint (no sub-CAs), and gets a random
/// 128-bit serial number.
///
/// # Errors
///
/// Returns an error if key generation, signing, or encoding fails.
pub fn build_ca(profile: &SubjectProfile) -> Result<(Certificate, PrivateKey)> {
    let mut params = base_params(profile, CERT_VALIDITY_DAYS)?;
    params.is_ca = IsCa::Ca(BasicConstraints::Constrained(0));
    params.key_usages = vec![
        KeyUsagePurpose::KeyCertSign,
        KeyUsagePurpose::CrlSign,
        KeyUsagePurpose::DigitalSignature,
    ];

    issuer::issue(params, None)
}

/// Builds a certificate for server authentication, signed by the given CA.
///
/// # Errors
///
/// Returns `Error::InvalidCa` if the CA certificate or key cannot be
/// parsed, `Error::Validation` if `common_name` is empty, and issuance
/// errors otherwise.
pub fn build_server_certificate(
    ca_cert: &[u8],
    ca_key: &[u8],
    common_name: &str,
    profile: &SubjectProfile,
) -> Result<(Certificate, PrivateKey)> {
    build_leaf(ca_cert, ca_key, common_name, profile, &LeafRole::Server)
}

/// Builds a certificate for client authentication, signed by the given CA.
///
/// # Errors
///
/// Returns `Error::InvalidCa` if the CA certificate or key cannot be
/// parsed, `Error::Validation` if `common_name` is empty, and issuance
/// errors otherwise.
pub fn build_client_certificate(
    ca_cert: &[u8],
    ca_key: &[u8],
    common_name: &str,
    profile: &SubjectProfile,
) -> Result<(Certificate, PrivateKey)> {
    build_leaf(ca_cert, ca_key, common_name, profile, &LeafRole::Client)
}

fn build_leaf(
    ca_cert: &[u8],
    ca_key: &[u8],
    common_name: &str,
    profile: &SubjectProfile,
    role: &LeafRole,
) -> Result<(Certificate, PrivateKey)> {
    if common_name.trim().is_empty() {
        return Err(Error::Validation("common name must not be empty".into()));
    }

    let ca_certificate = Certificate::from_der(ca_cert)
        .map_err(|e| Error::InvalidCa(format!("failed to parse CA certificate: {e}")))?;
    let ca_key_pair = KeyPair::try_from(ca_key)
        .map_err(|e| Error::InvalidCa(format!("failed to parse CA private key: {e}")))?;

    let subject = SubjectProfile {
        common_name: common_name.to_string(),
        ..profile.clone()
    };

    let mut params = base_params(&subject, CERT_VALIDITY_DAYS)?;
    params.is_ca = IsCa::NoCa;
    // AKI is copied from the issuer only when the issuer carries an SKI.
    params.use_authority_key_identifier_extension = ca_certificate.subject_key_id().is_some();

    match role {
        LeafRole::Server => {
            params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
            params.key_usages = vec![
                KeyUsagePurpose::KeyEncipherment,
                KeyUsagePurpose::DigitalSignature,
            ];
        }
        LeafRole::Client => {
            params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ClientAuth];
            params.key_usages = vec![KeyUsagePurpose::DigitalSignature];
        }
    }

    issuer::issue(params, Some((&ca_certificate, &ca_key_pair)))
}
