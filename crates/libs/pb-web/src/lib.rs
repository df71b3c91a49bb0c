//! Web layer of the phonebook service.
//!
//! This library provides the request context and the authorization gate for
//! protected routes, the login and registration flows, phone record
//! operations, and the mapping of every error to an HTTP response.

pub mod auth_token;
pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod phone;
pub mod prelude;
pub mod traits;
pub mod user;
