//! Credential hashing and verification.
//!
//! New credentials are stored as Argon2id PHC strings. Documents written by
//! earlier deployments hold plaintext secrets; those still verify (compared
//! through SHA-256 digests) and report [`Verification::NeedsUpgrade`] so the
//! caller can replace them with a hash.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand_core::OsRng;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashError(String);

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "credential hashing failed: {}", self.0)
    }
}

impl std::error::Error for HashError {}

/// Outcome of checking a claimed secret against a stored reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Mismatch,
    Match,
    /// Matched a legacy plaintext reference.
    NeedsUpgrade,
}

/// Hash `secret` with a fresh random salt.
pub fn hash(secret: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError(e.to_string()))
}

/// Check `claimed` against `stored`.
///
/// Only argon2-family PHC strings take the hash path. Anything else,
/// including plaintext that happens to look like a PHC string, is a legacy
/// reference.
pub fn verify(claimed: &str, stored: &str) -> Verification {
    match PasswordHash::new(stored) {
        Ok(parsed) if is_argon2(&parsed) => {
            if Argon2::default()
                .verify_password(claimed.as_bytes(), &parsed)
                .is_ok()
            {
                Verification::Match
            } else {
                Verification::Mismatch
            }
        }
        _ => {
            if Sha256::digest(claimed.as_bytes()) == Sha256::digest(stored.as_bytes()) {
                Verification::NeedsUpgrade
            } else {
                Verification::Mismatch
            }
        }
    }
}

/// Spend the same work as [`verify`] for an identity with no stored
/// reference, then fail.
pub fn reject(claimed: &str) -> Verification {
    if let Some(reference) = absent_reference() {
        let _ = verify(claimed, reference);
    }
    Verification::Mismatch
}

fn is_argon2(parsed: &PasswordHash<'_>) -> bool {
    matches!(parsed.algorithm.as_str(), "argon2id" | "argon2i" | "argon2d")
}

fn absent_reference() -> Option<&'static str> {
    static REFERENCE: OnceLock<Option<String>> = OnceLock::new();
    REFERENCE
        .get_or_init(|| hash("askgate-absent-account").ok())
        .as_deref()
}
