//! OpenVPN static key generation.
//!
//! A static key is a 2048-bit pre-shared secret used for the `tls-crypt` /
//! `tls-auth` control-channel wrapping. The framing is fixed; only the key
//! material varies.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Key material width in bytes (2048 bits).
const STATIC_KEY_BYTES: usize = 256;

/// Bytes per output line (32 hex characters).
const STATIC_KEY_LINE_BYTES: usize = 16;

/// Fixed banner and begin marker of the static key file format.
pub const STATIC_KEY_HEADER: &str =
    "#\n# 2048 bit OpenVPN static key\n#\n-----BEGIN OpenVPN Static key V1-----\n";

/// Fixed end marker of the static key file format.
pub const STATIC_KEY_FOOTER: &str = "-----END OpenVPN Static key V1-----";

/// Generates an OpenVPN static key.
///
/// Draws 256 bytes from the OS randomness source and hex-encodes them in
/// 16-byte lines between the fixed header and footer markers.
///
/// # Errors
///
/// Returns `Error::Randomness` if the randomness source fails.
pub fn generate_static_key() -> Result<Vec<u8>> {
    let mut key = [0u8; STATIC_KEY_BYTES];
    OsRng
        .try_fill_bytes(&mut key)
        .map_err(|e| Error::Randomness(e.to_string()))?;

    let mut buf = Vec::from(STATIC_KEY_HEADER.as_bytes());
    for chunk in key.chunks(STATIC_KEY_LINE_BYTES) {
        buf.extend_from_slice(hex::encode(chunk).as_bytes());
        buf.push(b'\n');
    }
    buf.extend_from_slice(STATIC_KEY_FOOTER.as_bytes());

    Ok(buf)
}
