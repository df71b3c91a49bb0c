//! Connection pool and its configuration.

pub mod config;
pub mod connection;
