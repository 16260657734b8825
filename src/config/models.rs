use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbConfig {
    /// API base, no trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Image CDN base, no trailing slash. Joined with a size segment and a
    /// poster path to build image URLs; never fetched by the server.
    #[serde(default = "default_image_base")]
    pub image_base: String,
    /// Bearer credential for the TMDB v3 API.
    #[serde(default)]
    pub token: String,
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            image_base: default_image_base(),
            token: String::new(),
        }
    }
}
