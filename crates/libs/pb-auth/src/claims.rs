//! Identity claims carried by a session token.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prelude::*;

/// The identity a session token is minted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub login: String,
}

/// Claims of a validated session token.
///
/// `user_id` is always emitted as a JSON integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject, the user's login.
    pub sub: String,
    pub login: String,
    pub user_id: i64,
    /// Issued at, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration, seconds since the epoch.
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(identity: &SessionIdentity, now: DateTime<Utc>, validity: TimeDelta) -> Result<Self> {
        let expiration = now
            .checked_add_signed(validity)
            .ok_or(Error::ExpirationOutOfRange)?;

        Ok(Self {
            sub: identity.login.clone(),
            login: identity.login.clone(),
            user_id: identity.user_id,
            iat: Some(now.timestamp()),
            exp: expiration.timestamp(),
        })
    }
}

/// Claims as they come off the wire, before `user_id` is checked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSessionClaims {
    pub sub: String,
    pub login: String,
    #[serde(default)]
    pub user_id: Value,
    #[serde(default)]
    pub iat: Option<i64>,
    pub exp: i64,
}

impl TryFrom<RawSessionClaims> for SessionClaims {
    type Error = Error;

    fn try_from(raw: RawSessionClaims) -> Result<Self> {
        Ok(Self {
            user_id: user_id_from_claim(&raw.user_id)?,
            sub: raw.sub,
            login: raw.login,
            iat: raw.iat,
            exp: raw.exp,
        })
    }
}

/// Converts a `user_id` claim into an integer id.
///
/// Tokens minted by other encoders may carry the id as a floating point
/// number (`7.0`). Those are accepted as long as the value is integral and
/// fits in an `i64`. Anything else is a [`Error::ClaimType`].
///
/// ```rust
/// use pb_auth::claims::user_id_from_claim;
/// use serde_json::json;
///
/// assert_eq!(user_id_from_claim(&json!(7)).unwrap(), 7);
/// assert_eq!(user_id_from_claim(&json!(7.0)).unwrap(), 7);
/// assert!(user_id_from_claim(&json!(7.5)).is_err());
/// assert!(user_id_from_claim(&json!("7")).is_err());
/// ```
pub fn user_id_from_claim(value: &Value) -> Result<i64> {
    let Value::Number(number) = value else {
        return Err(Error::ClaimType(format!("user_id is not a number: {value}")));
    };

    if let Some(id) = number.as_i64() {
        return Ok(id);
    }

    match number.as_f64() {
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
        Some(id)
            if id.is_finite()
                && id.fract() == 0.0
                && id >= i64::MIN as f64
                && id < i64::MAX as f64 =>
        {
            Ok(id as i64)
        }
        _ => Err(Error::ClaimType(format!("user_id is not an integer: {number}"))),
    }
}
