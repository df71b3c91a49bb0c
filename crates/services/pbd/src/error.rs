//! Error types for the phonebook daemon.
//!
//! Covers everything that can stop the daemon from starting or serving.
//! Request-level failures never reach this type; they are answered by
//! [`pb_web::error::Error`].

/// Errors that can occur while running the phonebook daemon.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] pb_models::error::Error),

    #[error(transparent)]
    Auth(#[from] pb_auth::error::Error),
}
