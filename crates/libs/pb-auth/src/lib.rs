//! Authentication primitives for the phonebook service.
//!
//! - [`secret_hash`]: adaptive password hashing and verification.
//! - [`jwt`]: the session token codec (issue and validate signed tokens).
//! - [`claims`]: the identity claims carried inside a session token.
//!
//! Nothing in this crate performs I/O; every operation is a pure computation
//! over its inputs and the codec's immutable secret.

pub mod auth_body;
pub mod claims;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

/// Header carrying a session token when no cookie is sent.
pub const AUTH_HEADER: &str = "Authorization";
/// Scheme prefix expected in [`AUTH_HEADER`].
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
