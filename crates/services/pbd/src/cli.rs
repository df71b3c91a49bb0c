//! Command-line interface for the phonebook daemon.
//!
//! Every flag can also be set through the environment.

use std::fmt;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use pb_models::db::config::DbConfig;

/// Deployment environment the daemon reports at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        write!(f, "{name}")
    }
}

/// Command-line interface for the phonebook daemon.
#[derive(Parser)]
#[command(name = "pbd")]
#[command(about = "Phonebook daemon - user accounts and phone records over HTTP")]
pub struct Cli {
    /// API server port
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Environment (development|staging|production)
    #[arg(long, env = "PB_ENV", value_enum, default_value_t = Environment::Development)]
    pub env: Environment,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Max open db connections
    #[arg(long, default_value_t = 25)]
    pub db_max_open_conns: u32,

    /// Db connections kept open while idle
    #[arg(long, default_value_t = 25)]
    pub db_max_idle_conns: u32,

    /// Max db connection idle time, in seconds
    #[arg(long, default_value_t = 900)]
    pub db_max_idle_time: u64,

    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}

impl Cli {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            database_url: self.database_url.clone(),
            max_open_conns: self.db_max_open_conns,
            max_idle_conns: self.db_max_idle_conns,
            max_idle_time: Duration::from_secs(self.db_max_idle_time),
        }
    }
}
