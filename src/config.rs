// src/config.rs
use std::net::IpAddr;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres { database_url: String, max_connections: u32 },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreConfig,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("HOST") {
            Some(raw) => parse(&raw, "HOST")?,
            None => parse(DEFAULT_HOST, "HOST")?,
        };
        let port = match lookup("PORT") {
            Some(raw) => parse(&raw, "PORT")?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::MissingDatabaseUrl)?;
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(raw) => parse(&raw, "DATABASE_MAX_CONNECTIONS")?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StoreConfig::Postgres { database_url, max_connections }
            }
            Some("memory") => StoreConfig::Memory,
            Some(other) => return Err(invalid("STORE_BACKEND", other)),
        };

        Ok(Self { host, port, store })
    }
}

fn parse<T: std::str::FromStr>(raw: &str, key: &'static str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(key, raw))
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid { key, value: value.to_string() }
}
