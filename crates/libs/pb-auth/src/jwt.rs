//! Session token codec.
//!
//! Session tokens are HS256-signed JWTs carrying [`SessionClaims`]. A token is
//! valid when its signature matches the codec's secret and its `exp` is still
//! in the future. There is no server-side registry of issued tokens.
//!
//! The secret is handed to [`TokenCodec::new`] once at startup and never
//! changes for the lifetime of the codec. The codec holds no mutable state and
//! can be shared freely between request handlers.
//!
//! # Examples
//!
//! ```rust
//! use pb_auth::{claims::SessionIdentity, jwt::TokenCodec};
//!
//! let codec = TokenCodec::new(b"MySuperSecret").unwrap();
//! let identity = SessionIdentity {
//!     user_id: 1,
//!     login: String::from("alice"),
//! };
//!
//! let token = codec.issue(&identity).unwrap();
//! let claims = codec.validate(&token).unwrap();
//! assert_eq!(claims.user_id, 1);
//! assert_eq!(claims.sub, "alice");
//! ```

use std::{fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::Deserialize;
use tracing::error;

use crate::claims::{RawSessionClaims, SessionClaims, SessionIdentity};
use crate::prelude::*;

/// How long an issued session token is accepted.
pub const SESSION_TOKEN_VALIDITY: TimeDelta = TimeDelta::hours(72);

/// Algorithm used to sign new tokens.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithms accepted on validation. Anything outside the HMAC family is
/// refused before the signature is looked at.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Key pair derived from the shared secret.
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and validates session tokens with a single symmetric secret.
pub struct TokenCodec {
    keys: Keys,
    validation: Validation,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl TokenCodec {
    /// Creates a codec signing with `secret`.
    ///
    /// Fails with [`Error::EmptySecret`] when `secret` is empty.
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Expiry is checked against the caller's clock in `validate_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            keys: Keys::new(secret),
            validation,
        })
    }

    /// Issues a token for `identity`, valid for [`SESSION_TOKEN_VALIDITY`].
    pub fn issue(&self, identity: &SessionIdentity) -> Result<String> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &SessionIdentity, now: DateTime<Utc>) -> Result<String> {
        let claims = SessionClaims::new(identity, now, SESSION_TOKEN_VALIDITY)?;
        encode(&Header::new(ALGORITHM), &claims, &self.keys.encoding).map_err(|err| {
            error!("Failed to encode JWT {err}");
            Error::TokenCreation(err)
        })
    }

    /// Validates `token` and returns its claims.
    ///
    /// The checks run in this order, the first failure wins:
    ///
    /// 1. structure → [`Error::TokenMalformed`]
    /// 2. declared algorithm is HMAC → [`Error::TokenUnsupportedAlgorithm`]
    /// 3. signature → [`Error::TokenBadSignature`]
    /// 4. `exp` in the future → [`Error::TokenExpired`]
    /// 5. `user_id` is an integer → [`Error::ClaimType`]
    pub fn validate(&self, token: &str) -> Result<SessionClaims> {
        self.validate_at(token, Utc::now())
    }

    /// Validates `token` as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims> {
        let algorithm = declared_algorithm(token)?;
        if !HMAC_ALGORITHMS.contains(&algorithm) {
            return Err(Error::TokenUnsupportedAlgorithm(format!("{algorithm:?}")));
        }

        let claims = decode::<RawSessionClaims>(token, &self.keys.decoding, &self.validation)
            .map_err(rejection)?
            .claims;

        if claims.exp <= now.timestamp() {
            return Err(Error::TokenExpired);
        }

        claims.try_into()
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"REDACTED")
            .finish()
    }
}

/// Reads the `alg` field of the token header without trusting anything else.
fn declared_algorithm(token: &str) -> Result<Algorithm> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::TokenMalformed);
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| Error::TokenMalformed)?;
    let header: RawHeader = serde_json::from_slice(&header).map_err(|_| Error::TokenMalformed)?;

    Algorithm::from_str(&header.alg).map_err(|_| Error::TokenUnsupportedAlgorithm(header.alg))
}

fn rejection(err: jsonwebtoken::errors::Error) -> Error {
    match err.kind() {
        ErrorKind::InvalidSignature => Error::TokenBadSignature,
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            Error::TokenUnsupportedAlgorithm(err.to_string())
        }
        _ => Error::TokenMalformed,
    }
}
