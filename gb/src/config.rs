//! goalboard configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::Location;
use crate::progress::DEFAULT_TARGET_KM;
use crate::resolution::ResolutionOrder;

/// Main goalboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Where the CSV files live
    pub sources: SourcesConfig,

    /// Fetch behaviour
    pub fetch: FetchConfig,

    /// Running goal
    pub running: RunningConfig,

    /// Page presentation
    pub display: DisplayConfig,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if !self.running.target_km.is_finite() || self.running.target_km <= 0.0 {
            return Err(eyre::eyre!(
                "running.target-km must be a positive number, got {}",
                self.running.target_km
            ));
        }
        Location::parse(&self.sources.base).context("Invalid sources.base")?;
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .goalboard.yml
        let local_config = PathBuf::from(".goalboard.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/goalboard/goalboard.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("goalboard").join("goalboard.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is set up
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = [
            config_path.cloned(),
            Some(PathBuf::from(".goalboard.yml")),
            dirs::config_dir().map(|d| d.join("goalboard").join("goalboard.yml")),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// CSV source locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Directory, file:// URL or http(s):// URL the names are resolved against
    pub base: String,

    /// Mandatory resolutions file
    pub resolutions: String,

    /// Optional running log
    pub runs: String,

    /// Optional gym visit log
    pub gym: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            base: ".".to_string(),
            resolutions: "resolutions.csv".to_string(),
            runs: "runs.csv".to_string(),
            gym: "gym.csv".to_string(),
        }
    }
}

/// Fetch configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in milliseconds; unset waits indefinitely
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Running goal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunningConfig {
    /// Yearly distance goal in kilometres
    #[serde(rename = "target-km")]
    pub target_km: f64,
}

impl Default for RunningConfig {
    fn default() -> Self {
        Self {
            target_km: DEFAULT_TARGET_KM,
        }
    }
}

/// Page presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Page heading and document title
    pub title: String,

    /// Resolution card ordering
    #[serde(rename = "resolution-order")]
    pub resolution_order: ResolutionOrder,

    /// Directory with `*.hbs` template overrides
    #[serde(rename = "templates-dir")]
    pub templates_dir: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "My Goals".to_string(),
            resolution_order: ResolutionOrder::File,
            templates_dir: None,
        }
    }
}
