use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use reel_core::RenderSettings;
use reel_engine::{ApiSettings, GeneratorConfig, MediaWriter, PollSettings};
use reel_logging::{reel_debug, reel_info, reel_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "scriptreel.ron";
pub const API_URL_ENV: &str = "SCRIPTREEL_API_URL";

/// User configuration, read from a RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub settings: RenderSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: ApiSettings::default().base_url,
            output_dir: PathBuf::from("./output"),
            request_timeout_secs: 30,
            poll_interval_secs: 2,
            settings: RenderSettings::default(),
        }
    }
}

impl AppConfig {
    /// Replaces the API URL when `url` is set and non-blank.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..ApiSettings::default()
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            output_dir: self.output_dir.clone(),
            poll: PollSettings {
                interval: Duration::from_secs(self.poll_interval_secs.max(1)),
            },
        }
    }
}

pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Reads the config at `path`. A missing file yields defaults; a broken one
/// is logged and also yields defaults.
pub fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            reel_debug!("No config at {:?}; using defaults", path);
            return AppConfig::default();
        }
        Err(err) => {
            reel_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            reel_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            reel_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

/// Writes `config` to `path` as pretty RON, replacing the file atomically.
pub fn save_config(path: &Path, config: &AppConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to replace it", path.display());
    }
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        bail!("{} is not a file path", path.display());
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content =
        ron::ser::to_string_pretty(config, pretty).context("Failed to serialize config")?;
    MediaWriter::new(dir)
        .write(file_name, content.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    reel_info!("Wrote config to {:?}", path);
    Ok(())
}
