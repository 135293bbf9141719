use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://faculty_workload.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "faculty_workload=debug";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Logging comes up before the rest of the configuration is validated,
    /// so a bad setting is still reported through `tracing`.
    pub fn log_filter_from_env() -> String {
        Self::log_filter_from_lookup(|key| env::var(key).ok())
    }

    pub fn log_filter_from_lookup<F>(lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| AppError::Config(format!("BIND_ADDR {} is invalid: {}", raw_addr, e)))?;
        // The roster has a single local user; never listen beyond this machine.
        if !bind_addr.ip().is_loopback() {
            return Err(AppError::Config(format!(
                "BIND_ADDR must be a loopback address, got {}",
                bind_addr
            )));
        }

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
