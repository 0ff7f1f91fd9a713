use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::charset::UrlCharset;
use crate::presenter::SCHEME_PREFIX_LEN;

/// Environment variable overriding `protocol`.
pub const PROTOCOL_ENV: &str = "SNIP_PROTOCOL";
/// Environment variable overriding `host`.
pub const HOST_ENV: &str = "SNIP_HOST";

/// Client settings (optional `[client]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the snip service the client talks to.
    pub server_url: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout_secs: 10,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/snip/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnipConfig {
    /// Scheme of issued short URLs ("http" or "https").
    pub protocol: String,
    /// Public host (and optional port) of issued short URLs.
    pub host: String,
    /// Socket address the HTTP server listens on.
    pub bind: String,
    /// Directory with `index.html` and static assets served under `/static/`.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Optional passphrase; when set, issued codes are obfuscated with it.
    #[serde(default)]
    pub passphrase: Option<String>,
    #[serde(default)]
    pub client: ClientConfig,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "127.0.0.1:8000".to_string(),
            bind: "127.0.0.1:8000".to_string(),
            static_dir: None,
            passphrase: None,
            client: ClientConfig::default(),
        }
    }
}

impl SnipConfig {
    /// Apply `SNIP_PROTOCOL` / `SNIP_HOST` on top of file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(PROTOCOL_ENV).ok(),
            std::env::var(HOST_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, protocol: Option<String>, host: Option<String>) {
        if let Some(protocol) = protocol {
            self.protocol = protocol;
        }
        if let Some(host) = host {
            self.host = host;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.protocol.trim().is_empty() || self.host.trim().is_empty() {
            anyhow::bail!(
                "protocol and host must be non-empty ({} / {})",
                PROTOCOL_ENV,
                HOST_ENV
            );
        }
        if !self.display_prefix_fits() {
            tracing::warn!(
                protocol = %self.protocol,
                "short links will display with {} characters cut, not `{}://`",
                SCHEME_PREFIX_LEN,
                self.protocol
            );
        }
        if let Some(passphrase) = &self.passphrase {
            if !UrlCharset::alphanumeric().contains_all(passphrase) {
                anyhow::bail!("passphrase may only contain [0-9a-zA-Z]");
            }
        }
        Ok(())
    }

    /// True when `{protocol}://` is exactly what the result display strips.
    pub fn display_prefix_fits(&self) -> bool {
        self.protocol.len() + "://".len() == SCHEME_PREFIX_LEN
    }

    /// Public prefix of every issued short URL, e.g. `https://snip.example/`.
    pub fn domain_name(&self) -> String {
        format!("{}://{}/", self.protocol, self.host)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("snip")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Environment overrides are applied and the result validated.
pub fn load_or_init() -> Result<SnipConfig> {
    let path = config_path()?;
    let mut cfg = if !path.exists() {
        let default_cfg = SnipConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    } else {
        let data = fs::read_to_string(&path)?;
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?
    };
    cfg.apply_env();
    cfg.validate()?;
    Ok(cfg)
}
