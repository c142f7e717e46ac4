use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// PostgreSQL connection URL for watch history. Unset means in-memory history.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL for catalog caching. Unset disables the cache.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Deadline applied to every external call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let vars = vec![("TMDB_API_KEY".to_string(), "secret".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.tmdb_api_key, "secret");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.database_url, None);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let vars: Vec<(String, String)> = vec![("PORT".to_string(), "8080".to_string())];
        let result: Result<Config, _> = envy::from_iter(vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "k".to_string()),
            ("REQUEST_TIMEOUT_SECS".to_string(), "3".to_string()),
            ("DATABASE_URL".to_string(), "postgres://db/mates".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.database_url.as_deref(), Some("postgres://db/mates"));
        assert_eq!(config.port, 8080);
    }
}
