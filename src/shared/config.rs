//! Application configuration. Backend credentials, paths, timeouts.

use serde::Deserialize;

/// Default ceiling for one publish/draft-save round trip, in milliseconds.
pub const DEFAULT_PUBLISH_TIMEOUT_MS: u64 = 10_000;

/// Default simulated backend latency for the mock publisher, in milliseconds.
pub const DEFAULT_MOCK_DELAY_MS: u64 = 1_500;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Publish backend base URL. When unset, the mock publisher is used.
    /// Read from COMPOSE_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer token for the publish backend. Read from COMPOSE_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Directory scanned for selectable media. Read from COMPOSE_MEDIA_DIR.
    #[serde(default)]
    pub media_dir: Option<String>,

    /// Ceiling in ms for one publish/draft-save round trip.
    /// Read from COMPOSE_PUBLISH_TIMEOUT_MS.
    #[serde(default)]
    pub publish_timeout_ms: Option<u64>,

    /// Simulated mock-backend latency in ms. Read from COMPOSE_MOCK_DELAY_MS.
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("COMPOSE"));
        if let Ok(path) = std::env::var("COMPOSE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// True when an HTTP publish backend is configured.
    pub fn is_backend_configured(&self) -> bool {
        self.api_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url.clone().unwrap_or_default()
    }

    pub fn api_key_or_default(&self) -> String {
        self.api_key.clone().unwrap_or_default()
    }

    /// Media directory scanned by the filesystem picker. Defaults to ./media.
    pub fn media_dir_or_default(&self) -> String {
        self.media_dir
            .clone()
            .unwrap_or_else(|| "./media".to_string())
    }

    pub fn publish_timeout_ms_or_default(&self) -> u64 {
        self.publish_timeout_ms.unwrap_or(DEFAULT_PUBLISH_TIMEOUT_MS)
    }

    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(DEFAULT_MOCK_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = AppConfig::default();
        assert!(!cfg.is_backend_configured());
        assert_eq!(cfg.media_dir_or_default(), "./media");
        assert_eq!(cfg.publish_timeout_ms_or_default(), 10_000);
        assert_eq!(cfg.mock_delay_ms_or_default(), 1_500);
    }

    #[test]
    fn backend_configured_requires_nonempty_url() {
        let cfg = AppConfig {
            api_url: Some(String::new()),
            ..Default::default()
        };
        assert!(!cfg.is_backend_configured());

        let cfg = AppConfig {
            api_url: Some("http://localhost:8080".to_string()),
            ..Default::default()
        };
        assert!(cfg.is_backend_configured());
    }
}
