//! Credential checks and session token minting for web requests.

use pb_auth::{
    auth_body::AuthBody,
    claims::SessionIdentity,
    jwt::TokenCodec,
    secret_hash::{is_secret_valid, verify_against_placeholder},
};
use pb_models::user::User;
use tracing::error;

use crate::prelude::*;
use crate::traits::storage::Storage;
use crate::user::UserLoginRequest;

/// Authenticates a user by login and password.
///
/// Unknown logins and wrong passwords both yield [`Error::WrongCredentials`]
/// after the same hashing work; storage failures and corrupted stored hashes
/// surface as internal errors.
///
/// # Examples
///
/// ```rust
/// use pb_web::auth_token::authenticate;
/// use pb_web::user::UserLoginRequest;
/// # use pb_web::traits::storage::Storage;
///
/// # fn example(storage: &dyn Storage) -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = UserLoginRequest::new("alice", "p@ss1234");
/// let user = authenticate(&credentials, storage)?;
/// println!("Authenticated user {}", user.id);
/// # Ok(())
/// # }
/// ```
pub fn authenticate(credentials: &UserLoginRequest, storage: &dyn Storage) -> Result<User> {
    let Some(user) = storage.user_by_login(&credentials.login)? else {
        verify_against_placeholder(&credentials.password);
        return Err(Error::WrongCredentials);
    };

    if !is_secret_valid(&credentials.password, &user.password)? {
        return Err(Error::WrongCredentials);
    }
    Ok(user)
}

/// Mints a session token for `user`.
pub fn generate_token(user: &User, codec: &TokenCodec) -> Result<AuthBody> {
    let identity = SessionIdentity {
        user_id: user.id,
        login: user.login.clone(),
    };
    let token = codec.issue(&identity).map_err(|err| {
        error!("Failed to issue session token for user {}: {err}", user.id);
        err
    })?;

    Ok(AuthBody::new(token))
}
