//! Password hashing and verification using Argon2id.
//!
//! Hashing always uses the same pinned cost parameters ([`MEMORY_COST_KIB`],
//! [`TIME_COST`], [`PARALLELISM`]); verification reads the parameters back out
//! of the stored PHC string, so hashes stay verifiable if the constants change.
//!
//! # Examples
//!
//! ```rust
//! use pb_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("p@ss1234").unwrap();
//! assert!(is_secret_valid("p@ss1234", &hash).unwrap());
//! assert!(!is_secret_valid("wrong", &hash).unwrap());
//! ```

use std::sync::LazyLock;

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Argon2 memory cost in KiB.
pub const MEMORY_COST_KIB: u32 = 19_456;
/// Argon2 iteration count.
pub const TIME_COST: u32 = 2;
/// Argon2 lanes.
pub const PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(Error::HashParams)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes `pw` with a fresh random salt.
///
/// The returned PHC string embeds algorithm, cost and salt and is what gets
/// persisted in place of the password.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(hasher()?.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Verifies `pw` against a stored hash.
///
/// # Returns
///
/// * `Ok(true)` - Password matches the hash
/// * `Ok(false)` - Password does not match the hash
/// * `Err(Error::PasswordHash)` - The stored hash could not be parsed or used
pub fn is_secret_valid(pw: &str, hash: &str) -> Result<bool> {
    let hash = PasswordHashString::new(hash)?;

    match hasher()?.verify_password(pw.as_bytes(), &hash.password_hash()) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Hash of a password nobody knows, computed once with the pinned parameters.
static PLACEHOLDER_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| generate_secret_hash("placeholder-secret").ok());

/// Spends the cost of one verification when there is no stored hash.
///
/// Callers run this for unknown logins so that rejecting them takes as long
/// as rejecting a wrong password.
pub fn verify_against_placeholder(pw: &str) {
    match PLACEHOLDER_HASH.as_deref() {
        Some(hash) => {
            let _ = is_secret_valid(pw, hash);
        }
        None => {
            let _ = generate_secret_hash(pw);
        }
    }
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
