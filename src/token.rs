//! Pickup token issuance and verification.
//!
//! The token is the sole pickup credential, so both halves are strict:
//! issuance draws from the operating system's CSPRNG (never from any order
//! field), and verification compares in constant time so a mismatch reveals
//! nothing about how long a matching prefix was.

use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

/// Raw entropy per token. 16 bytes = 128 bits, hex-encoded to 32 characters.
pub const TOKEN_BYTES: usize = 16;

/// Mints and verifies opaque pickup secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    /// Produces a fresh token: [`TOKEN_BYTES`] bytes from [`OsRng`],
    /// hex-encoded. Not sequential, not derived from any identifier.
    pub fn issue(&self) -> String {
        let mut buf = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut buf);
        hex::encode(buf)
    }

    /// Compares a presented token against the stored one.
    ///
    /// The byte comparison is constant-time in the length of `stored`; the
    /// length gate itself reveals only the (public) token length.
    pub fn verify(&self, stored: &str, presented: &str) -> bool {
        stored.len() == presented.len()
            && bool::from(stored.as_bytes().ct_eq(presented.as_bytes()))
    }
}
