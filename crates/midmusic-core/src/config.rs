use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where feeds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    Http,
    Fixture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,
    /// Base URL of the catalog service; `/home` and `/explore` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,
    /// Feed files used when `source = "fixture"`.
    #[serde(default = "default_home_fixture")]
    pub home_fixture: PathBuf,
    #[serde(default = "default_explore_fixture")]
    pub explore_fixture: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// URL probed to decide whether the internet is reachable.
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
    #[serde(default = "default_probe_interval")]
    pub probe_interval_secs: u64,
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_volume")]
    pub default_volume: f32,
    /// Prefix that turns a catalog id into something mpv can open.
    #[serde(default = "default_watch_url_base")]
    pub watch_url_base: String,
}

/// User-configurable paths for downloads and library data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned by the Downloads screen.
    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: PathBuf,
    /// Playlists and favorites.
    #[serde(default = "default_library_file")]
    pub library_file: PathBuf,
    /// Where exported library snapshots are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// File read by "Import Library".
    #[serde(default = "default_import_file")]
    pub import_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Ring the terminal bell as press feedback.
    #[serde(default)]
    pub haptics: bool,
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            base_url: default_base_url(),
            timeout_secs: default_catalog_timeout(),
            home_fixture: default_home_fixture(),
            explore_fixture: default_explore_fixture(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_url: default_probe_url(),
            probe_interval_secs: default_probe_interval(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
            watch_url_base: default_watch_url_base(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            downloads_dir: default_downloads_dir(),
            library_file: default_library_file(),
            export_dir: default_export_dir(),
            import_file: default_import_file(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            haptics: false,
            show_keys_bar: default_show_keys_bar(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8787/music".to_string()
}

fn default_catalog_timeout() -> u64 {
    20
}

fn default_home_fixture() -> PathBuf {
    platform::data_dir().join("feeds").join("home.json")
}

fn default_explore_fixture() -> PathBuf {
    platform::data_dir().join("feeds").join("explore.json")
}

fn default_probe_url() -> String {
    "https://clients3.google.com/generate_204".to_string()
}

fn default_probe_interval() -> u64 {
    10
}

fn default_probe_timeout() -> u64 {
    4
}

fn default_volume() -> f32 {
    0.5
}

fn default_watch_url_base() -> String {
    "https://music.youtube.com/watch?v=".to_string()
}

fn default_downloads_dir() -> PathBuf {
    dirs::audio_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("midmusic-downloads")
}

fn default_library_file() -> PathBuf {
    platform::data_dir().join("library.json")
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_import_file() -> PathBuf {
    default_export_dir().join("midmusic-library.json")
}

fn default_show_keys_bar() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.source, CatalogSource::Http);
        assert!(config.catalog.base_url.starts_with("http"));
        assert!(config.network.probe_url.starts_with("https://"));
        assert!(config.paths.library_file.ends_with("midmusic/library.json"));
        assert!(!config.ui.haptics);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [catalog]
            source = "fixture"
            home_fixture = "/tmp/home.json"

            [ui]
            haptics = true
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.source, CatalogSource::Fixture);
        assert_eq!(config.catalog.home_fixture, PathBuf::from("/tmp/home.json"));
        assert_eq!(config.catalog.timeout_secs, 20);
        assert!(config.ui.haptics);
        assert!(config.ui.show_keys_bar);
        assert_eq!(config.network.probe_interval_secs, 10);
    }
}
