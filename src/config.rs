// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SUPABASE_URL` | Identity store base URL | Required unless `SEED_USERS_FILE` is set |
//! | `SUPABASE_ANON_KEY` | Identity store API key | Required with `SUPABASE_URL` |
//! | `USERS_TABLE` | Users collection name | `Users` |
//! | `STORE_TIMEOUT_SECS` | Identity store request timeout | `10` |
//! | `SEED_USERS_FILE` | JSON user list for the in-memory store (development) | - |
//! | `DATA_DIR` | Root directory for the local cache | `./data` |
//! | `USER_CACHE` | Mirror fetched users into `{DATA_DIR}/cache/users.json` | `true` |
//! | `SESSION_TIMEOUT_SECS` | Session length reported at sign-in | `1800` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::auth::DEFAULT_SESSION_TIMEOUT;
use crate::identity::rest::{RestStoreConfig, DEFAULT_TIMEOUT, DEFAULT_USERS_TABLE};
use crate::storage::paths::DATA_ROOT;

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const USERS_TABLE_ENV: &str = "USERS_TABLE";
pub const STORE_TIMEOUT_ENV: &str = "STORE_TIMEOUT_SECS";
pub const SEED_USERS_FILE_ENV: &str = "SEED_USERS_FILE";
/// Environment variable name for the local data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const USER_CACHE_ENV: &str = "USER_CACHE";
pub const SESSION_TIMEOUT_ENV: &str = "SESSION_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration missing: {0}")]
    Missing(String),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Where user records come from.
#[derive(Debug, Clone)]
pub enum IdentitySource {
    /// Hosted identity store
    Remote(RestStoreConfig),
    /// In-memory store seeded from a JSON file
    Seed(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub identity: IdentitySource,
    pub data_dir: PathBuf,
    pub user_cache: bool,
    pub session_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let identity = match (get(SUPABASE_URL_ENV), get(SEED_USERS_FILE_ENV)) {
            (Some(raw_url), _) => {
                let base_url = Url::parse(&raw_url).map_err(|e| invalid(SUPABASE_URL_ENV, e))?;
                let api_key = get(SUPABASE_ANON_KEY_ENV)
                    .ok_or_else(|| ConfigError::Missing(SUPABASE_ANON_KEY_ENV.to_string()))?;
                let table =
                    get(USERS_TABLE_ENV).unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string());
                let timeout = parse_or(
                    get(STORE_TIMEOUT_ENV),
                    STORE_TIMEOUT_ENV,
                    DEFAULT_TIMEOUT.as_secs(),
                )?;

                IdentitySource::Remote(
                    RestStoreConfig::new(base_url, api_key)
                        .with_table(table)
                        .with_timeout(Duration::from_secs(timeout)),
                )
            }
            (None, Some(seed)) => IdentitySource::Seed(PathBuf::from(seed)),
            (None, None) => {
                return Err(ConfigError::Missing(format!(
                    "{SUPABASE_URL_ENV} or {SEED_USERS_FILE_ENV}"
                )))
            }
        };

        let user_cache = match get(USER_CACHE_ENV).as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(invalid(
                    USER_CACHE_ENV,
                    format!("expected true/false, got {other}"),
                ))
            }
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(invalid(
                    LOG_FORMAT_ENV,
                    format!("expected json/pretty, got {other}"),
                ))
            }
        };

        Ok(Self {
            identity,
            data_dir: PathBuf::from(get(DATA_DIR_ENV).unwrap_or_else(|| DATA_ROOT.to_string())),
            user_cache,
            session_timeout: Duration::from_secs(parse_or(
                get(SESSION_TIMEOUT_ENV),
                SESSION_TIMEOUT_ENV,
                DEFAULT_SESSION_TIMEOUT.as_secs(),
            )?),
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(get(PORT_ENV), PORT_ENV, DEFAULT_PORT)?,
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(value: Option<String>, name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.parse().map_err(|e| invalid(name, e)),
        None => Ok(default),
    }
}

fn invalid(name: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
