//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroizing;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random key material that is wiped when dropped
///
/// Used for development signing secrets when none is configured.
pub fn random_secret(len: usize) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(random_bytes(len))
}
