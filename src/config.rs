//! Environment-driven configuration.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::domain::subscription::service::total_cost_service::DEFAULT_OPEN_ENDED_HORIZON_YEARS;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Years past the current month that open-ended subscriptions are billed for.
    pub open_ended_horizon_years: u32,
    /// Directory for daily rolling log files; stdout only when unset.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; overrides the individual fields when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub sslmode: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        match self.url {
            Some(ref url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                self.user, self.password, self.host, self.port, self.name, self.sslmode
            ),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let string_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                port: parse_or(get("PORT"), "PORT", 8080)?,
                request_timeout: Duration::from_secs(parse_or(
                    get("REQUEST_TIMEOUT_SECS"),
                    "REQUEST_TIMEOUT_SECS",
                    10,
                )?),
            },
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                host: string_or("DB_HOST", "localhost"),
                port: parse_or(get("DB_PORT"), "DB_PORT", 5432)?,
                user: string_or("DB_USER", "postgres"),
                password: string_or("DB_PASSWORD", "postgres"),
                name: string_or("DB_NAME", "subscriptions"),
                sslmode: string_or("DB_SSLMODE", "disable"),
                max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 10)?,
            },
            open_ended_horizon_years: parse_or(
                get("OPEN_ENDED_HORIZON_YEARS"),
                "OPEN_ENDED_HORIZON_YEARS",
                DEFAULT_OPEN_ENDED_HORIZON_YEARS,
            )?,
            log_dir: get("LOG_DIR").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err| anyhow!("invalid value '{raw}' for {key}: {err}")),
        None => Ok(default),
    }
}
