use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::plan::TimingLimits;

/// Retry policy parameters for segment producers (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per segment (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/wurq/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WurqConfig {
    /// Sets per station when the caller does not pass one.
    pub sets_per_station: i64,
    /// Maximum jobs that may run at once; further starts are rejected.
    pub max_active_jobs: usize,
    /// How often the CLI polls job progress, in milliseconds.
    pub poll_interval_ms: u64,
    /// Where generated output goes (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Artificial per-segment delay for the placeholder producer, in milliseconds.
    #[serde(default)]
    pub segment_delay_ms: Option<u64>,
    /// Optional retry policy; if missing, segments are not retried.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional input bounds; if missing, any plan-able timing is accepted.
    #[serde(default)]
    pub limits: Option<TimingLimits>,
}

impl Default for WurqConfig {
    fn default() -> Self {
        Self {
            sets_per_station: crate::plan::DEFAULT_SETS_PER_STATION,
            max_active_jobs: 4,
            poll_interval_ms: 500,
            output_dir: None,
            segment_delay_ms: None,
            retry: None,
            limits: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wurq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WurqConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<WurqConfig> {
    if !path.exists() {
        let default_cfg = WurqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("write default config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: WurqConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
