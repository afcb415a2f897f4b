use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Recipe search API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where favorites are persisted
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the recipe search API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the API (without the `/api/recipes/v2` path)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Application id (can also be set via EDAMAM_APP_ID)
    pub app_id: Option<String>,
    /// Application key (can also be set via EDAMAM_APP_KEY)
    pub app_key: Option<String>,
    /// Value of the account-user header (can also be set via EDAMAM_USER_ID)
    pub user_id: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_id: None,
            app_key: None,
            user_id: None,
            timeout: default_timeout(),
        }
    }
}

/// Configuration for durable favorites storage
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    /// Key the favorites list is stored under
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            favorites_key: default_favorites_key(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.edamam.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".recipe-finder")
}

fn default_favorites_key() -> String {
    "favorites".to_string()
}

impl AppConfig {
    /// Load configuration from `config.toml` in the current directory and
    /// from the environment. See [`load_config`].
    pub fn load() -> Result<Self, ConfigError> {
        load_config(None)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_FINDER__ prefix
/// 2. The given file, or config.toml in the current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_FINDER__API__APP_KEY
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("config").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: RECIPE_FINDER__API__APP_ID
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
