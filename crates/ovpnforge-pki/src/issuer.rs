//! Single-certificate issuance.
//!
//! Builds and signs one certificate from a set of `rcgen` parameters,
//! either self-signed (chain root) or chained to an issuer. The issuer's
//! signing identity is rebuilt from its parsed certificate so the new
//! certificate's authority key identifier matches the issuer's subject key
//! identifier byte-for-byte.

use chrono::{DateTime, Duration, Utc};
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyIdMethod, KeyPair,
    KeyUsagePurpose, SerialNumber,
};

use crate::error::{Error, Result};
use crate::keys;
use crate::types::{Certificate, PrivateKey, SubjectProfile};

/// Builds the parameters shared by every issued certificate: subject
/// identity, a fresh random serial, the SHA-256 key identifier method, and
/// the validity window starting at issuance time.
pub(crate) fn base_params(
    subject: &SubjectProfile,
    validity_days: i64,
) -> Result<CertificateParams> {
    let mut params = CertificateParams::default();
    params.distinguished_name = distinguished_name(subject);
    params.serial_number = Some(SerialNumber::from(keys::random_serial()?));
    params.key_identifier_method = KeyIdMethod::Sha256;

    let now = Utc::now();
    params.not_before = to_rcgen_time(now)?;
    params.not_after = to_rcgen_time(now + Duration::days(validity_days))?;

    Ok(params)
}

/// Issues a certificate described by `params`.
///
/// A fresh key pair is generated for the certificate. With no issuer the
/// certificate is self-signed by that key; otherwise it is signed by the
/// issuer's key and chained via the authority key identifier.
///
/// # Errors
///
/// Returns `Error::KeyGeneration` if key generation fails,
/// `Error::Signing` if construction or signing fails, and
/// `Error::Encoding` if the issued certificate cannot be re-read.
pub(crate) fn issue(
    params: CertificateParams,
    issuer: Option<(&Certificate, &KeyPair)>,
) -> Result<(Certificate, PrivateKey)> {
    let key_pair = keys::generate_key_pair()?;

    let cert = match issuer {
        Some((ca_cert, ca_key)) => {
            let issuer_cert = rebuild_issuer(ca_cert, ca_key)?;
            params
                .signed_by(&key_pair, &issuer_cert, ca_key)
                .map_err(|e| Error::Signing(format!("failed to sign certificate: {e}")))?
        }
        None => params
            .self_signed(&key_pair)
            .map_err(|e| Error::Signing(format!("failed to self-sign certificate: {e}")))?,
    };

    let der = cert.der().to_vec();
    let private_key = PrivateKey::new(key_pair.serialize_der());
    let certificate = Certificate::from_der(&der)
        .map_err(|e| Error::Encoding(format!("issued certificate failed to round-trip: {e}")))?;

    Ok((certificate, private_key))
}

/// Rebuilds the issuer's signing identity from its parsed certificate.
///
/// The subject key identifier is pre-specified from the parsed certificate
/// when present, so chained certificates reference the issuer's actual
/// identifier rather than a recomputed one.
fn rebuild_issuer(ca_cert: &Certificate, ca_key: &KeyPair) -> Result<rcgen::Certificate> {
    let mut params = CertificateParams::default();
    params.distinguished_name = distinguished_name(ca_cert.subject());
    params.is_ca = IsCa::Ca(BasicConstraints::Constrained(0));
    params.key_usages = vec![
        KeyUsagePurpose::KeyCertSign,
        KeyUsagePurpose::CrlSign,
        KeyUsagePurpose::DigitalSignature,
    ];
    params.key_identifier_method = match ca_cert.subject_key_id() {
        Some(ski) => KeyIdMethod::PreSpecified(ski.to_vec()),
        None => KeyIdMethod::Sha256,
    };
    params.not_before = to_rcgen_time(ca_cert.not_before())?;
    params.not_after = to_rcgen_time(ca_cert.not_after())?;

    params
        .self_signed(ca_key)
        .map_err(|e| Error::Signing(format!("failed to rebuild issuer certificate: {e}")))
}

/// Converts a subject profile to an X.509 distinguished name.
///
/// Attribute order is fixed (C, L, O, CN) so a rebuilt issuer name is
/// byte-identical to the one written at CA creation. Empty fields are
/// omitted.
pub(crate) fn distinguished_name(subject: &SubjectProfile) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    if !subject.country.is_empty() {
        dn.push(DnType::CountryName, subject.country.as_str());
    }
    if !subject.locality.is_empty() {
        dn.push(DnType::LocalityName, subject.locality.as_str());
    }
    if !subject.organization.is_empty() {
        dn.push(DnType::OrganizationName, subject.organization.as_str());
    }
    dn.push(DnType::CommonName, subject.common_name.as_str());
    dn
}

/// Converts a chrono `DateTime` to an rcgen `OffsetDateTime`.
fn to_rcgen_time(dt: DateTime<Utc>) -> Result<time::OffsetDateTime> {
    time::OffsetDateTime::from_unix_timestamp(dt.timestamp())
        .map_err(|e| Error::Signing(format!("invalid timestamp: {e}")))
}
