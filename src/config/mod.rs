pub mod database;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Postgres connection string. Without it the service keeps data in memory.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Allowed browser origin. Any origin is allowed when unset.
    pub frontend_url: Option<String>,
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_environment()
    }

    /// Reads the process environment only.
    pub fn from_environment() -> anyhow::Result<Self> {
        let config = ::config::Config::builder()
            .set_default("port", 5000_i64)?
            .set_default("jwt_expiry_hours", 24_i64)?
            .add_source(::config::Environment::default().try_parsing(true))
            .build()
            .context("failed to read environment")?
            .try_deserialize::<Config>()
            .context("invalid configuration")?;

        if config.jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        if config.jwt_expiry_hours <= 0 {
            anyhow::bail!("JWT_EXPIRY_HOURS must be positive");
        }

        Ok(config)
    }
}
