use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default index location: the Anthem 2026-01-01 table-of-contents file.
pub const DEFAULT_INDEX_URL: &str =
    "https://antm-pt-prod-dataz-nogbd-nophi-us-east1.s3.amazonaws.com/anthem/2026-01-01_anthem_index.json.gz";

/// Global configuration loaded from `~/.config/mrfx/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrfxConfig {
    /// URL of the gzip-compressed index document.
    pub index_url: String,
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Abort the transfer if throughput stays below this many bytes/sec...
    pub low_speed_limit_bytes: u32,
    /// ...for this many seconds (stall detection on a long-running stream).
    pub low_speed_time_secs: u64,
}

impl Default for MrfxConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mrfx")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MrfxConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MrfxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MrfxConfig = toml::from_str(&data)?;
    Ok(cfg)
}
