//! Private PKI issuance for OpenVPN deployments.
#![forbid(unsafe_code)]
//!
//! This crate builds a small one-level PKI: a self-signed root CA plus
//! server- and client-authentication leaf certificates chained to it, with
//! the extensions OpenVPN peers need to verify each other.
//!
//! # Overview
//!
//! - Every certificate gets a freshly generated key pair and a random
//!   128-bit serial number.
//! - Every certificate carries a subject key identifier derived from its
//!   public key; leaves carry an authority key identifier equal to the
//!   CA's subject key identifier, which is what lets verifiers build the
//!   chain.
//! - The facade accepts and returns DER buffers; PEM wrapping and file I/O
//!   are the caller's responsibility (the types expose `pem()` helpers).
//!
//! # Example
//!
//! ```
//! use ovpnforge_pki::types::SubjectProfile;
//! use ovpnforge_pki::{build_ca, build_server_certificate};
//!
//! let profile = SubjectProfile::default();
//! let (ca_cert, ca_key) = build_ca(&profile).unwrap();
//!
//! let (cert, _key) =
//!     build_server_certificate(ca_cert.der(), ca_key.der(), "server", &profile).unwrap();
//!
//! assert_eq!(cert.issuer(), profile.common_name);
//! assert_eq!(cert.authority_key_id(), ca_cert.subject_key_id());
//! ```
//!
//! # Modules
//!
//! - [`ca`] - Issuance facade (root CA, server leaf, client leaf)
//! - [`validation`] - Certificate validation utilities
//! - [`types`] - Core types (`Certificate`, `PrivateKey`, `SubjectProfile`)
//! - [`error`] - Error types

pub mod ca;
pub mod error;
pub mod types;
pub mod validation;

mod issuer;
mod keys;

// Re-export commonly used items at crate root
pub use ca::{CERT_VALIDITY_DAYS, build_ca, build_client_certificate, build_server_certificate};
pub use error::{Error, Result};
pub use types::{Certificate, PrivateKey, SubjectProfile};
pub use validation::{is_expired, is_not_yet_valid, is_valid_now, validate_certificate};
