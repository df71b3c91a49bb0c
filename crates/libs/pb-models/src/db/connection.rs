//! Database connection management and migrations.

use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;
use diesel::r2d2::Pool;
use diesel_migrations::embed_migrations;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use tracing::info;

use super::config::DbConfig;
use crate::prelude::*;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Database connection pool wrapper.
#[derive(Debug, Clone)]
pub struct DbConnection {
    /// PostgreSQL connection pool.
    pub pool: Pool<ConnectionManager<PgConnection>>,
}

impl DbConnection {
    /// Create a new database connection pool.
    ///
    /// Fails if the pool cannot open its initial connections.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pb_models::db::{connection::DbConnection, config::DbConfig};
    ///
    /// let config = DbConfig::new("postgres://localhost/phonebook");
    /// let db = DbConnection::new(&config).unwrap();
    /// ```
    pub fn new(config: &DbConfig) -> Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_open_conns)
            .min_idle(Some(config.idle_floor()))
            .idle_timeout(Some(config.max_idle_time))
            .build(manager)?;
        info!("Database connection pool established");
        Ok(Self { pool })
    }

    /// Run pending database migrations and return the connection.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pb_models::db::{connection::DbConnection, config::DbConfig};
    ///
    /// let config = DbConfig::new("postgres://localhost/phonebook");
    /// let db = DbConnection::new(&config).unwrap().setup().unwrap();
    /// ```
    pub fn setup(self) -> Result<Self> {
        info!("Running Database Migrations");
        let applied = self
            .pool
            .get()?
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| Error::Migration(err.to_string()))?
            .len();
        info!("Applied {applied} migrations");
        Ok(self)
    }
}
