use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{RelayError, Result};

pub const DEFAULT_CACHE_DIR: &str = "./data/textures";
pub const DEFAULT_CACHE_URL_ROOT: &str = "/textures";
pub const DEFAULT_ARCHIVE_TIMEOUT_SECONDS: u64 = 30;
/// Fits a base64-encoded 2048x2048 BGRA texture with room to spare.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArchiveConfig {
    pub endpoint: String,
    pub bucket: String,
    /// Root the archived textures are served from. Falls back to
    /// `<endpoint>/<bucket>`.
    pub public_root: Option<String>,
    /// Sent verbatim as the `Authorization` header on uploads.
    pub authorization: Option<String>,
    /// Upload timeout, [`DEFAULT_ARCHIVE_TIMEOUT_SECONDS`] when unset.
    pub timeout_seconds: Option<u64>,
}

impl ArchiveConfig {
    pub fn timeout(&self) -> Duration {
        let seconds = self
            .timeout_seconds
            .unwrap_or(DEFAULT_ARCHIVE_TIMEOUT_SECONDS)
            .max(1);
        Duration::from_secs(seconds)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TextureConfig {
    pub cache_dir: Option<String>,
    pub cache_url_root: Option<String>,
    pub archive: Option<ArchiveConfig>,
}

impl TextureConfig {
    pub fn cache_dir(&self) -> &str {
        self.cache_dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .unwrap_or(DEFAULT_CACHE_DIR)
    }

    pub fn cache_url_root(&self) -> &str {
        self.cache_url_root
            .as_deref()
            .map(|root| root.trim().trim_end_matches('/'))
            .unwrap_or(DEFAULT_CACHE_URL_ROOT)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventsConfig {
    /// Append the presence footer on every drain even when the subscriber's
    /// filter does not list it.
    pub always_include_presence: Option<bool>,
    /// Filter applied to sessions that do not request one.
    pub default_filter: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DaemonConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub token: Option<String>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub textures: Option<TextureConfig>,
    pub events: Option<EventsConfig>,
    pub daemon: Option<DaemonConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RelayError::Config(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| RelayError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn textures(&self) -> TextureConfig {
        self.textures.clone().unwrap_or_default()
    }

    pub fn events(&self) -> EventsConfig {
        self.events.clone().unwrap_or_default()
    }

    pub fn max_body_bytes(&self) -> usize {
        self.daemon
            .as_ref()
            .and_then(|daemon| daemon.max_body_bytes)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    pub fn always_include_presence(&self) -> bool {
        self.events
            .as_ref()
            .and_then(|events| events.always_include_presence)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_defaults_apply_to_blank_values() {
        let textures = TextureConfig {
            cache_dir: Some("  ".to_string()),
            cache_url_root: Some("https://cdn.example/tex/".to_string()),
            archive: None,
        };
        assert_eq!(textures.cache_dir(), DEFAULT_CACHE_DIR);
        assert_eq!(textures.cache_url_root(), "https://cdn.example/tex");
        assert_eq!(TextureConfig::default().cache_url_root(), DEFAULT_CACHE_URL_ROOT);
    }

    #[test]
    fn missing_sections_fall_back() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(!config.always_include_presence());
        assert!(config.textures().archive.is_none());
        assert_eq!(config.max_body_bytes(), DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn archive_uploads_always_time_out() {
        assert_eq!(
            ArchiveConfig::default().timeout(),
            Duration::from_secs(DEFAULT_ARCHIVE_TIMEOUT_SECONDS)
        );
        let archive = ArchiveConfig {
            timeout_seconds: Some(0),
            ..ArchiveConfig::default()
        };
        assert_eq!(archive.timeout(), Duration::from_secs(1));
    }
}
