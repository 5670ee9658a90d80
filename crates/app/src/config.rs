//! Configuration file
//!
//! Looked up at `--config <path>`, then `numera.toml` in the platform
//! config directory. Every key is optional.
//!
//! ```toml
//! log_level = "info"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 65432
//! idle_timeout_secs = 30
//! settle_timeout_ms = 200
//! max_payload_bytes = 1048576
//!
//! [format]
//! precision = 10
//! style = "truncated"   # or "repeating"
//!
//! [client]
//! host = "localhost"
//! port = 65432
//! timeout_secs = 30
//! max_reply_bytes = 16777216
//! ```

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use numera_core::FormatOptions;
use numera_net::{ClientConfig, ServerConfig};
use serde::Deserialize;

/// File name looked up in the config directory
pub const CONFIG_FILE: &str = "numera.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
    pub server: ServerSection,
    pub format: FormatOptions,
    pub client: ClientSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerSection::default(),
            format: FormatOptions::default(),
            client: ClientSection::default(),
        }
    }
}

/// `[server]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    pub idle_timeout_secs: u64,
    pub settle_timeout_ms: u64,
    pub max_payload_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: numera_net::DEFAULT_PORT,
            idle_timeout_secs: numera_net::DEFAULT_TIMEOUT.as_secs(),
            settle_timeout_ms: numera_net::DEFAULT_SETTLE_TIMEOUT.as_millis() as u64,
            max_payload_bytes: numera_net::MAX_PAYLOAD,
        }
    }
}

/// `[client]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSection {
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
    pub max_reply_bytes: usize,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: numera_net::DEFAULT_PORT,
            timeout_secs: numera_net::DEFAULT_TIMEOUT.as_secs(),
            max_reply_bytes: numera_net::MAX_REPLY,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location if it exists, or
    /// fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.format.precision > 0, "format.precision must be at least 1");
        ensure!(
            self.server.max_payload_bytes > 0,
            "server.max_payload_bytes must be at least 1"
        );
        ensure!(
            self.server.idle_timeout_secs > 0,
            "server.idle_timeout_secs must be at least 1"
        );
        ensure!(
            self.server.settle_timeout_ms > 0,
            "server.settle_timeout_ms must be at least 1"
        );
        ensure!(
            self.client.timeout_secs > 0,
            "client.timeout_secs must be at least 1"
        );
        ensure!(
            self.client.max_reply_bytes > 0,
            "client.max_reply_bytes must be at least 1"
        );
        Ok(())
    }

    pub fn server_config(&self) -> Result<ServerConfig> {
        let bind = resolve(&self.server.host, self.server.port)?;
        Ok(ServerConfig {
            bind,
            idle_timeout: Duration::from_secs(self.server.idle_timeout_secs),
            settle_timeout: Duration::from_millis(self.server.settle_timeout_ms),
            max_payload: self.server.max_payload_bytes,
            format: self.format,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            addr: format!("{}:{}", self.client.host, self.client.port),
            timeout: Duration::from_secs(self.client.timeout_secs),
            max_reply: self.client.max_reply_bytes,
        }
    }
}

/// `numera.toml` in the platform config directory
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "numera", "numera").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .with_context(|| format!("cannot resolve listen address {}:{}", host, port))?
        .next()
        .with_context(|| format!("no address found for {}:{}", host, port))
}
