//! # Password Hashing
//!
//! Password hashing and verification using bcrypt.
//!
//! The salt and cost are embedded in the hash string (`$2b$<cost>$...`), so
//! verification needs nothing but the stored value.

use crate::{Error, Result};

/// bcrypt only looks at the first 72 bytes; longer inputs are rejected instead
/// of silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Work factor used when `BCRYPT_COST` is unset.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Accepted work factors; bcrypt keeps its own bounds private.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Hash a password using bcrypt with the given cost (4..=31).
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(Error::Hashing(format!(
            "password exceeds {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    bcrypt::hash(password, cost).map_err(|e| Error::Hashing(e.to_string()))
}

/// Verify a plaintext password against a bcrypt hash.
///
/// A mismatch and an unparsable hash both yield `false`.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
