//! Authentication errors.

#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Token Missing")]
    TokenMissing,
    #[error("Malformed Token")]
    TokenMalformed,
    #[error("Unsupported Token Algorithm '{0}'")]
    TokenUnsupportedAlgorithm(String),
    #[error("Bad Token Signature")]
    TokenBadSignature,
    #[error("Token Expired")]
    TokenExpired,

    /// A signed, unexpired token carries a claim of the wrong type.
    #[error("Invalid Claim Type {0}")]
    ClaimType(String),

    #[error("Token expiration out of range")]
    ExpirationOutOfRange,
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error("Invalid password hash parameters {0}")]
    HashParams(argon2::Error),
}

impl Error {
    /// Whether this error means the caller simply failed to present a usable
    /// token, as opposed to a fault on our side.
    ///
    /// ```rust
    /// use pb_auth::error::Error;
    ///
    /// assert!(Error::TokenExpired.is_token_rejection());
    /// assert!(!Error::ClaimType(String::from("user_id")).is_token_rejection());
    /// ```
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Error::TokenMissing
                | Error::TokenMalformed
                | Error::TokenUnsupportedAlgorithm(_)
                | Error::TokenBadSignature
                | Error::TokenExpired
        )
    }
}
