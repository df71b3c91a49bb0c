//! User registration and lookup.

use std::fmt;

use pb_auth::secret_hash::generate_secret_hash;
use pb_models::user::{User, UserCreate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::prelude::*;
use crate::traits::storage::Storage;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserApi {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub age: i32,
}

impl From<User> for UserApi {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            login: value.login,
            name: value.name,
            age: value.age,
        }
    }
}

impl fmt::Display for UserApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User '{}' (ID: {})", self.login, self.id)
    }
}

/// Registration form.
#[derive(Deserialize, Serialize)]
pub struct UserRegister {
    pub login: String,
    pub password: String,
    pub name: String,
    pub age: i32,
}

/// Login request body.
#[derive(Deserialize, Serialize)]
pub struct UserLoginRequest {
    pub login: String,
    pub password: String,
}

impl UserLoginRequest {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRegister")
            .field("login", &self.login)
            .field("password", &"REDACTED")
            .field("name", &self.name)
            .field("age", &self.age)
            .finish()
    }
}

impl fmt::Debug for UserLoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLoginRequest")
            .field("login", &self.login)
            .field("password", &"REDACTED")
            .finish()
    }
}

/// Registers a new user.
///
/// The password is hashed before it reaches storage.
///
/// # Examples
///
/// ```rust
/// use pb_web::user::{UserRegister, register_user};
/// # use pb_web::traits::storage::Storage;
///
/// # fn example(storage: &dyn Storage) -> Result<(), Box<dyn std::error::Error>> {
/// let payload = UserRegister {
///     login: "alice".to_string(),
///     password: "p@ss1234".to_string(),
///     name: "Alice".to_string(),
///     age: 30,
/// };
/// let user = register_user(payload, storage)?;
/// # Ok(())
/// # }
/// ```
pub fn register_user(payload: UserRegister, storage: &dyn Storage) -> Result<UserApi> {
    if payload.login.is_empty() || payload.password.is_empty() {
        return Err(Error::BadRequest(String::from(
            "login and password must not be empty",
        )));
    }

    let password = generate_secret_hash(&payload.password)?;
    let user = storage.insert_user(UserCreate {
        login: payload.login,
        password,
        name: payload.name,
        age: payload.age,
    })?;

    let user = UserApi::from(user);
    info!("Registered {user}");
    Ok(user)
}

/// Fetches a user by display name.
pub fn fetch_user_by_name(name: &str, storage: &dyn Storage) -> Result<UserApi> {
    storage
        .user_by_name(name)?
        .map(UserApi::from)
        .ok_or(Error::NotFound)
}
