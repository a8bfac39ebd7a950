use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::format::FormatUrl;
use crate::retry::RetryPolicy;

/// HTTP client settings (`[http]` in config.toml).
///
/// The same timeout applies to HTML and JSON fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub follow_redirects: bool,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 15,
            follow_redirects: true,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Retry policy parameters (`[retry]` in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds; the sleep after a failed attempt is this
    /// times the number of attempts still allowed (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 1.0,
        }
    }
}

impl RetryConfig {
    /// Fails if `base_delay_secs` is infinite or too large for a `Duration`.
    pub fn policy(&self) -> Result<RetryPolicy> {
        let base_delay = Duration::try_from_secs_f64(self.base_delay_secs.max(0.0))
            .with_context(|| format!("retry.base_delay_secs = {} is out of range", self.base_delay_secs))?;
        Ok(RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay,
        })
    }
}

/// Global configuration loaded from `~/.config/urlfmt/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlfmtConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Named format URLs, e.g. `steam_app = "%s://store.steampowered.com/app/%d"`.
    #[serde(default)]
    pub formats: BTreeMap<String, FormatUrl>,
}

impl UrlfmtConfig {
    /// Looks `name` up among the named formats, otherwise treats it as a
    /// literal template.
    pub fn resolve_format(&self, name: &str) -> Result<FormatUrl> {
        if let Some(f) = self.formats.get(name) {
            return Ok(f.clone());
        }
        name.parse::<FormatUrl>()
            .with_context(|| format!("{:?} is neither a named format nor a valid template", name))
    }

    /// Named formats that match `url`, in name order.
    pub fn identify<'a>(&'a self, url: &'a str) -> impl Iterator<Item = (&'a str, &'a FormatUrl)> + 'a {
        self.formats
            .iter()
            .filter(move |(_, f)| f.is_match(url))
            .map(|(name, f)| (name.as_str(), f))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlfmt")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlfmtConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<UrlfmtConfig> {
    if !path.exists() {
        let default_cfg = UrlfmtConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: UrlfmtConfig =
        toml::from_str(&data).with_context(|| format!("invalid config at {}", path.display()))?;
    cfg.retry
        .policy()
        .with_context(|| format!("invalid config at {}", path.display()))?;
    Ok(cfg)
}
