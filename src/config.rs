use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Data directory layout
    #[serde(default)]
    pub data: DataConfig,
    /// Listen address for the HTTP server
    #[serde(default = "Config::default_bind_address")]
    pub bind_address: String,
    /// Allowed CORS origins. Required unless cors_permissive is true.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Explicitly allow all origins (development only). Defaults to false.
    #[serde(default)]
    pub cors_permissive: bool,
}

/// Locations of the timetable data, allocation plans, and the clip archive.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory containing index.json and the timetable period files
    #[serde(default = "DataConfig::default_schedule_dir")]
    pub schedule_dir: PathBuf,
    /// Directory containing the daily YYYY_MM_DD.min.json allocation plans
    #[serde(default = "DataConfig::default_allocation_dir")]
    pub allocation_dir: PathBuf,
    /// Root of the archived webcam clips (day directories with mp4 files)
    #[serde(default = "DataConfig::default_video_archive_dir")]
    pub video_archive_dir: PathBuf,
    /// Cache directory for generated clip thumbnails
    #[serde(default = "DataConfig::default_thumbnail_cache_dir")]
    pub thumbnail_cache_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            schedule_dir: Self::default_schedule_dir(),
            allocation_dir: Self::default_allocation_dir(),
            video_archive_dir: Self::default_video_archive_dir(),
            thumbnail_cache_dir: Self::default_thumbnail_cache_dir(),
        }
    }
}

impl DataConfig {
    fn default_schedule_dir() -> PathBuf {
        PathBuf::from("data/schedule")
    }
    fn default_allocation_dir() -> PathBuf {
        PathBuf::from("data/locomotive_allocations")
    }
    fn default_video_archive_dir() -> PathBuf {
        PathBuf::from("data/videos")
    }
    fn default_thumbnail_cache_dir() -> PathBuf {
        PathBuf::from("data/thumbnails")
    }
}

impl Config {
    fn default_bind_address() -> String {
        "0.0.0.0:3000".to_string()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}
