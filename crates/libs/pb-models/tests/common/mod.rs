use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pb_models::db::{config::DbConfig, connection::DbConnection};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Migrated database for one test. Reverts every migration on drop.
pub struct DBTestContext {
    pub conn: PgConnection,
    pub db: DbConnection,
}

impl DBTestContext {
    pub fn new(url: &str) -> Self {
        let mut conn = PgConnection::establish(url).expect("Cannot connect to database");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run database migrations");

        let mut config = DbConfig::new(url);
        config.max_open_conns = 2;
        config.max_idle_conns = 0;
        let db = DbConnection::new(&config).expect("Failed to build pool");

        Self { conn, db }
    }

    /// `None` when `DATABASE_URL` is not set, so the suite can run without
    /// a database.
    pub fn from_env() -> Option<Self> {
        std::env::var("DATABASE_URL").ok().map(|url| Self::new(&url))
    }
}

impl Drop for DBTestContext {
    fn drop(&mut self) {
        self.conn
            .revert_all_migrations(MIGRATIONS)
            .expect("Failed to revert changes to db");
    }
}
