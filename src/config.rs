use serde::Deserialize;
use std::time::Duration;

/// How cast biographies are fetched once the cast list is known
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CastDetailStrategy {
    /// One task per cast member, joined in cast order
    #[default]
    Concurrent,
    /// One request at a time, in cast order
    Sequential,
}

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation backend (the proxy serving /titles, /similar, ...)
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Upstream movie database URL prefix, forwarded to the proxy endpoints
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix prepended to poster and profile image paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    #[serde(default)]
    pub cast_detail_strategy: CastDetailStrategy,

    /// Per-request timeout; requests wait indefinitely when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            tmdb_api_url: default_tmdb_api_url(),
            image_base_url: default_image_base_url(),
            cast_detail_strategy: CastDetailStrategy::default(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.cast_detail_strategy, CastDetailStrategy::Concurrent);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_sequential_strategy_and_timeout() {
        let vars = vec![
            ("CAST_DETAIL_STRATEGY".to_string(), "sequential".to_string()),
            ("REQUEST_TIMEOUT_SECS".to_string(), "30".to_string()),
            ("BACKEND_URL".to_string(), "http://movies.local".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.cast_detail_strategy, CastDetailStrategy::Sequential);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.backend_url, "http://movies.local");
    }
}
