use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where descriptor files live (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Raw-content host, e.g. `https://raw.githubusercontent.com`.
    pub base_url: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Directory inside the repository holding the descriptors, e.g. `R/data`.
    pub path_prefix: String,
    /// Stem placed before the padded index (`data` gives `data0001`).
    pub file_prefix: String,
    /// Descriptor file extension without the dot.
    pub file_extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://raw.githubusercontent.com".to_string(),
            owner: "jc9677".to_string(),
            repo: "ceanav".to_string(),
            branch: "main".to_string(),
            path_prefix: "R/data".to_string(),
            file_prefix: "data".to_string(),
            file_extension: "R".to_string(),
        }
    }
}

/// Inclusive range of descriptor indices to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub first: u32,
    pub last: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self { first: 1, last: 88 }
    }
}

impl RangeConfig {
    pub fn indices(&self) -> std::ops::RangeInclusive<u32> {
        self.first..=self.last
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices().contains(&index)
    }
}

/// Per-request transport limits. Unset fields keep the libcurl defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Global configuration loaded from `~/.config/dsget/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsgetConfig {
    /// Base directory; one subdirectory per descriptor is created below it.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for DsgetConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            source: SourceConfig::default(),
            range: RangeConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl DsgetConfig {
    /// Rejects ranges the driver cannot walk (index 0 has no descriptor).
    pub fn validate(&self) -> Result<()> {
        if self.range.first == 0 {
            anyhow::bail!("range.first must be at least 1");
        }
        if self.range.first > self.range.last {
            anyhow::bail!(
                "range.first ({}) is greater than range.last ({})",
                self.range.first,
                self.range.last
            );
        }
        if self.source.base_url.trim().is_empty() {
            anyhow::bail!("source.base_url is empty");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dsget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DsgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DsgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file (e.g. `--config`).
pub fn load_from_path(path: &Path) -> Result<DsgetConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: DsgetConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}
