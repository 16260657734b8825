pub mod models;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use log::{info, warn};
use models::AppConfig;

pub type SharedConfig = Arc<RwLock<AppConfig>>;

/// Returns the path to the config file.
/// On Windows: %APPDATA%/marquee/config.toml
/// On Linux/macOS: ~/.config/marquee/config.toml
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("marquee").join("config.toml")
}

/// Load config from disk, or return default if not found.
/// The TMDB_TOKEN environment variable overrides the on-disk token.
pub fn load_config() -> AppConfig {
    let path = config_path();
    let mut config = if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config at {}: {}", path.display(), e);
                    AppConfig::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config at {}: {}", path.display(), e);
                AppConfig::default()
            }
        }
    } else {
        info!("No config found at {}, using defaults", path.display());
        AppConfig::default()
    };

    if let Ok(token) = std::env::var("TMDB_TOKEN") {
        if !token.is_empty() {
            config.tmdb.token = token;
        }
    }
    if config.tmdb.token.is_empty() {
        warn!("No TMDB token configured; upstream requests will be rejected");
    }
    config
}

/// Create a shared config instance.
pub fn init_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(load_config()))
}
