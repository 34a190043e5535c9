//! Key pair and serial number primitives.

use rand::RngCore;
use rand::rngs::OsRng;
use rcgen::KeyPair;

use crate::error::{Error, Result};

/// Serial number width in bytes (128 bits of entropy).
pub(crate) const SERIAL_NUMBER_BYTES: usize = 16;

/// Generates a fresh key pair for a certificate.
///
/// Every certificate gets its own key; keys are never reused across
/// certificates, including the CA's own key.
pub(crate) fn generate_key_pair() -> Result<KeyPair> {
    KeyPair::generate()
        .map_err(|e| Error::KeyGeneration(format!("failed to generate key pair: {e}")))
}

/// Draws a cryptographically random 128-bit serial number.
pub(crate) fn random_serial() -> Result<Vec<u8>> {
    let mut bytes = [0u8; SERIAL_NUMBER_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::KeyGeneration(format!("failed to draw serial number: {e}")))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pairs_are_unique() {
        let a = generate_key_pair().unwrap();
        let b = generate_key_pair().unwrap();
        assert_ne!(a.serialize_der(), b.serialize_der());
    }

    #[test]
    fn serial_has_full_width() {
        let serial = random_serial().unwrap();
        assert_eq!(serial.len(), SERIAL_NUMBER_BYTES);
    }

    #[test]
    fn serials_are_unique() {
        let a = random_serial().unwrap();
        let b = random_serial().unwrap();
        assert_ne!(a, b);
    }
}
