// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`AppConfig`] struct built
//! from them once at startup. Components receive their slice of the config
//! explicitly; nothing below `main` reads the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding `names.redb` | unset (in-memory names) |
//! | `RPC_PRIMARY_URL` | Primary JSON-RPC endpoint | unset (chain routes disabled) |
//! | `RPC_SECONDARY_URL` | Fallback JSON-RPC endpoint | unset |
//! | `RPC_TIMEOUT_MS` | Per-attempt timeout | `4000` |
//! | `RPC_RETRIES` | Retries per endpoint | `2` |
//! | `RPC_BACKOFF_MS` | Linear backoff step | `300` |
//! | `RPC_DEADLINE_MS` | Total deadline per call | unset (unbounded) |
//! | `TLS_CERT_PATH` | PEM certificate chain for HTTPS | unset (plain HTTP) |
//! | `TLS_KEY_PATH` | PEM private key for HTTPS | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::blockchain::{RpcConfig, DEFAULT_BACKOFF_STEP, DEFAULT_RETRIES, DEFAULT_TIMEOUT};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the data directory path.
///
/// When set, reservations are persisted to `{DATA_DIR}/names.redb` and
/// answered with `RESERVED`. Otherwise they live in memory (`RESERVED_MOCK`).
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const RPC_PRIMARY_URL_ENV: &str = "RPC_PRIMARY_URL";
pub const RPC_SECONDARY_URL_ENV: &str = "RPC_SECONDARY_URL";
pub const RPC_TIMEOUT_MS_ENV: &str = "RPC_TIMEOUT_MS";
pub const RPC_RETRIES_ENV: &str = "RPC_RETRIES";
pub const RPC_BACKOFF_MS_ENV: &str = "RPC_BACKOFF_MS";
pub const RPC_DEADLINE_MS_ENV: &str = "RPC_DEADLINE_MS";

pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// PEM files for serving HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Persist names here when set.
    pub data_dir: Option<PathBuf>,
    /// JSON-RPC endpoints; `None` disables chain routes.
    pub rpc: Option<RpcConfig>,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(get(PORT_ENV), PORT_ENV, DEFAULT_PORT);
        let bind_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{port}")))?;

        let rpc = get(RPC_PRIMARY_URL_ENV).map(|primary| {
            let timeout_ms = parse_or(
                get(RPC_TIMEOUT_MS_ENV),
                RPC_TIMEOUT_MS_ENV,
                DEFAULT_TIMEOUT.as_millis() as u64,
            );
            let backoff_ms = parse_or(
                get(RPC_BACKOFF_MS_ENV),
                RPC_BACKOFF_MS_ENV,
                DEFAULT_BACKOFF_STEP.as_millis() as u64,
            );
            let deadline = get(RPC_DEADLINE_MS_ENV)
                .and_then(|raw| parse_opt::<u64>(&raw, RPC_DEADLINE_MS_ENV))
                .map(Duration::from_millis);

            RpcConfig::new(primary)
                .with_secondary(get(RPC_SECONDARY_URL_ENV))
                .with_timeout(Duration::from_millis(timeout_ms))
                .with_retries(parse_or(get(RPC_RETRIES_ENV), RPC_RETRIES_ENV, DEFAULT_RETRIES))
                .with_backoff_step(Duration::from_millis(backoff_ms))
                .with_deadline(deadline)
        });

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            bind_addr,
            data_dir: get(DATA_DIR_ENV).map(PathBuf::from),
            rpc,
            tls,
            log_format,
        })
    }
}

fn parse_opt<T: FromStr>(raw: &str, key: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = raw, "Ignoring malformed configuration value");
            None
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    raw.and_then(|raw| parse_opt(&raw, key)).unwrap_or(default)
}
