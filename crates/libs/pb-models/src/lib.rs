//! Database models and ORM layer for the phonebook service.
//!
//! Provides Diesel-based models, queries, and connection management for
//! users and their phone numbers.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pb_models::{db::{config::DbConfig, connection::DbConnection}, user::User};
//!
//! let config = DbConfig::new("postgres://localhost/phonebook");
//! let conn = DbConnection::new(&config).unwrap().setup().unwrap();
//!
//! let alice = User::fetch_by_login("alice", &conn).unwrap();
//! println!("Found user {:?}", alice.map(|user| user.id));
//! ```

pub mod db;
pub mod error;
pub mod phone;
pub mod prelude;
mod schema;
pub mod user;
