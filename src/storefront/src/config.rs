/* src/storefront/src/config.rs */

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use storefront_core::{MetaDefaults, SiteConfig, ThemeConfig};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub backend: BackendSection,
  #[serde(default)]
  pub theme: ThemeConfig,
  #[serde(default)]
  pub meta: MetaDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_addr")]
  pub addr: String,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { addr: default_addr() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSection {
  #[serde(default = "default_api_url")]
  pub api_url: String,
  #[serde(default = "default_fetch_timeout_ms")]
  pub fetch_timeout_ms: u64,
  #[serde(default = "default_session_timeout_ms")]
  pub session_timeout_ms: u64,
}

impl Default for BackendSection {
  fn default() -> Self {
    Self {
      api_url: default_api_url(),
      fetch_timeout_ms: default_fetch_timeout_ms(),
      session_timeout_ms: default_session_timeout_ms(),
    }
  }
}

impl BackendSection {
  pub fn fetch_timeout(&self) -> Duration {
    Duration::from_millis(self.fetch_timeout_ms)
  }

  pub fn session_timeout(&self) -> Duration {
    Duration::from_millis(self.session_timeout_ms)
  }
}

fn default_addr() -> String {
  "0.0.0.0:3000".to_string()
}

fn default_api_url() -> String {
  "http://localhost:3001/api".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
  5000
}

fn default_session_timeout_ms() -> u64 {
  2000
}

impl AppConfig {
  pub fn site(&self) -> SiteConfig {
    SiteConfig { theme: self.theme.clone(), meta: self.meta.clone() }
  }

  /// Apply `PORT` and `STOREFRONT_API_URL` on top of the file values.
  pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(port) = lookup("PORT") {
      let port: u16 = port.trim().parse().with_context(|| format!("invalid PORT '{port}'"))?;
      let host = self.server.addr.rsplit_once(':').map_or("0.0.0.0", |(host, _)| host);
      self.server.addr = format!("{host}:{port}");
    }
    if let Some(url) = lookup("STOREFRONT_API_URL") {
      self.backend.api_url = url;
    }
    Ok(())
  }

  pub fn validate(&self) -> Result<()> {
    let api_url = self.backend.api_url.trim();
    if api_url.is_empty() {
      bail!("backend.api_url must not be empty");
    }
    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
      bail!("backend.api_url must be an http(s) URL, got '{api_url}'");
    }
    if self.backend.fetch_timeout_ms == 0 {
      bail!("backend.fetch_timeout_ms must be greater than 0");
    }
    if self.backend.session_timeout_ms == 0 {
      bail!("backend.session_timeout_ms must be greater than 0");
    }
    if self.server.addr.trim().is_empty() {
      bail!("server.addr must not be empty");
    }
    Ok(())
  }
}

/// Load `storefront.toml`. A missing file yields the built-in defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
  if !path.exists() {
    tracing::info!(path = %path.display(), "no config file, using defaults");
    return Ok(AppConfig::default());
  }
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
