//! Login response body.

use serde::{Deserialize, Serialize};

/// Body returned by a successful login.
///
/// # JSON Format
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthBody {
    /// The signed session token.
    pub access_token: String,
}

impl AuthBody {
    pub fn new(access_token: String) -> Self {
        Self { access_token }
    }
}
