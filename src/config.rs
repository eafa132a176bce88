//! Configuration module
//!
//! Host/port/logging settings with hard-coded defaults and command-line
//! overrides. There is no config file and no environment contract: the
//! server is a local development convenience.

use crate::paths::{self, DemoPaths};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Repository root override (`--root`); defaults to the crate directory
    pub root: Option<String>,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    /// Build configuration from defaults plus command-line arguments.
    ///
    /// Accepted flags: `--host H`, `--port P`, `--workers N`, `--root DIR`.
    /// Anything else is an error, surfaced before the server binds.
    pub fn from_args<I>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8001)?
            .set_default("logging.access_log", true)?;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value_for = |flag: &str| {
                args.next()
                    .ok_or_else(|| config::ConfigError::Message(format!("{flag} requires a value")))
            };
            match arg.as_str() {
                "--host" => {
                    builder = builder.set_override("server.host", value_for("--host")?)?;
                }
                "--port" => {
                    let raw = value_for("--port")?;
                    let port: i64 = raw.parse().map_err(|_| {
                        config::ConfigError::Message(format!("invalid port: {raw}"))
                    })?;
                    builder = builder.set_override("server.port", port)?;
                }
                "--workers" => {
                    let raw = value_for("--workers")?;
                    let workers: i64 = raw.parse().map_err(|_| {
                        config::ConfigError::Message(format!("invalid worker count: {raw}"))
                    })?;
                    if workers < 1 {
                        return Err(config::ConfigError::Message(format!(
                            "invalid worker count: {raw}"
                        )));
                    }
                    builder = builder.set_override("server.workers", workers)?;
                }
                "--root" => {
                    builder = builder.set_override("root", value_for("--root")?)?;
                }
                other => {
                    return Err(config::ConfigError::Message(format!(
                        "unknown argument: {other}"
                    )));
                }
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub fn root_dir(&self) -> PathBuf {
        self.root
            .as_ref()
            .map_or_else(paths::default_root, PathBuf::from)
    }
}

/// Shared, read-only per-process state handed to every request handler
#[derive(Debug)]
pub struct AppState {
    pub paths: DemoPaths,
    pub access_log: bool,
}

impl AppState {
    pub fn new(cfg: &Config, paths: DemoPaths) -> Self {
        Self {
            paths,
            access_log: cfg.logging.access_log,
        }
    }
}
