//! Database configuration management.

use std::fmt::Display;
use std::time::Duration;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_OPEN_CONNS: u32 = 25;
/// Default number of idle connections the pool keeps around.
pub const DEFAULT_MAX_IDLE_CONNS: u32 = 25;
/// Default time after which an idle connection is closed.
pub const DEFAULT_MAX_IDLE_TIME: Duration = Duration::from_secs(15 * 60);

/// Database connection configuration.
#[derive(Clone)]
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_open_conns: u32,
    /// Connections the pool keeps open while idle.
    ///
    /// The pool opens this many connections up front and never closes them
    /// for idleness. Connections opened beyond it under load are closed once
    /// idle for `max_idle_time`. See [`DbConfig::idle_floor`].
    pub max_idle_conns: u32,
    /// Idle connections older than this are closed.
    pub max_idle_time: Duration,
}

impl DbConfig {
    /// Create a configuration for `database_url` with default pool settings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::new("postgres://localhost/phonebook");
    /// assert_eq!(config.max_open_conns, 25);
    /// assert_eq!(config.to_string(), "REDACTED");
    /// ```
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_open_conns: DEFAULT_MAX_OPEN_CONNS,
            max_idle_conns: DEFAULT_MAX_IDLE_CONNS,
            max_idle_time: DEFAULT_MAX_IDLE_TIME,
        }
    }
}

impl DbConfig {
    /// Number of connections held open regardless of load.
    ///
    /// This is `max_idle_conns` capped at `max_open_conns`, handed to the
    /// pool as its minimum idle size.
    ///
    /// ```rust
    /// use pb_models::db::config::DbConfig;
    ///
    /// let mut config = DbConfig::new("postgres://localhost/phonebook");
    /// config.max_idle_conns = 2;
    /// assert_eq!(config.idle_floor(), 2);
    /// ```
    pub fn idle_floor(&self) -> u32 {
        self.max_idle_conns.min(self.max_open_conns)
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
