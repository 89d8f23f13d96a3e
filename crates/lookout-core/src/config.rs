//! Configuration types for lookout.
//!
//! [`Config::load`] layers an optional `lookout.toml` over hardcoded
//! defaults. [`Config::defaults`] returns the same defaults without touching
//! the filesystem (useful in tests). The `PORT` environment variable
//! overrides the configured listen value, matching what deployment scripts
//! already export.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
listen       = "5123"
history_file = "alerts_history.json"
capacity     = 500
"#;

const CONFIG_FILE: &str = "lookout.toml";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[server]` section of `lookout.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bare port or `host:port`. A bare port binds all interfaces.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Active history snapshot path. Rotation archives land beside it.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    /// Rolling-window capacity of the in-memory history.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_listen() -> String { "5123".to_string() }
fn default_history_file() -> PathBuf { PathBuf::from("alerts_history.json") }
fn default_capacity() -> usize { crate::store::DEFAULT_CAPACITY }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            history_file: default_history_file(),
            capacity: default_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path` (or `./lookout.toml` when `None`), layered on top of
    /// the built-in defaults. A missing file is fine; a malformed one is not.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.unwrap_or(Path::new(CONFIG_FILE));
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The address to bind, after applying the `PORT` environment override.
    pub fn listen_addr(&self) -> String {
        resolve_listen_addr(std::env::var("PORT").ok().as_deref(), &self.server.listen)
    }
}

// ---------------------------------------------------------------------------
// Listen address resolution
// ---------------------------------------------------------------------------

/// Resolve the bind address from an optional environment override and the
/// configured value. Either may be a bare port (`"5123"`) or a full
/// `host:port`; bare ports bind all interfaces.
pub fn resolve_listen_addr(env_value: Option<&str>, configured: &str) -> String {
    let value = env_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| configured.trim());
    let value = if value.is_empty() { "5123" } else { value };
    if value.contains(':') {
        value.to_string()
    } else {
        format!("0.0.0.0:{value}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
