use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "REEL_TMDB_API_KEY";

/// Simple configuration for reel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Label shown in the UI header for the logged-in member
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// Empty means not logged in; also settable via REEL_TMDB_API_KEY
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed query is actually searched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Results shown per query
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Delay before an empty result set says "no movies found"
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: String::new(),
            tmdb: TmdbConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            result_limit: default_result_limit(),
            grace_ms: default_grace_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_result_limit() -> usize {
    10
}

fn default_grace_ms() -> u64 {
    2000
}

impl Config {
    /// Load config from default location or create default if not found.
    /// The API key env var wins over the file either way.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        let mut config: Config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            config
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.tmdb.api_key = key;
            }
        }

        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "reel", "reel") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.reel/config.toml")
        }
    }
}
