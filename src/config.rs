//! Client configuration
//!
//! [`ClientConfig`] holds everything a [`SearchClient`](crate::SearchClient)
//! needs to reach the engine. It is immutable once a client is built; per
//! scroll timeouts are set on [`ScrollRequest`](crate::ScrollRequest) instead.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Content type sent with request bodies unless configured otherwise
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for reaching a search engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the engine, e.g. `http://localhost:9200`
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Content-Type attached to POST/PUT bodies
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_user_agent() -> String {
    format!("es-scroll/{}", env!("CARGO_PKG_VERSION"))
}

/// Whole seconds, rounded up so a sub-second duration never becomes zero
fn whole_seconds(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:9200")
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            content_type: default_content_type(),
            headers: HashMap::new(),
            user_agent: default_user_agent(),
        }
    }

    /// Create a config from scheme, host and port
    pub fn from_parts(scheme: &str, host: &str, port: &str) -> Self {
        Self::new(format!("{scheme}://{host}:{port}"))
    }

    /// Create a config from a raw URL, rejecting it if it does not parse
    pub fn from_url(raw: &str) -> Result<Self> {
        let config = Self::new(raw);
        config.base()?;
        Ok(config)
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load a config from a YAML (or JSON) file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML (or JSON) string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the timeouts and the base address
    pub fn validate(&self) -> Result<Url> {
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than zero"));
        }
        if self.connect_timeout_seconds == 0 {
            return Err(Error::config(
                "connect_timeout_seconds must be greater than zero",
            ));
        }
        self.base()
    }

    /// The validated base address
    pub fn base(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "'{}' cannot be used as a base address",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Connection timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout, rounded up to whole seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_seconds = whole_seconds(timeout);
        self
    }

    /// Set the connection timeout, rounded up to whole seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout_seconds = whole_seconds(timeout);
        self
    }

    /// Set the Content-Type used for request bodies
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.config.content_type = content_type.into();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:9200");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.content_type, DEFAULT_CONTENT_TYPE);
        assert!(config.headers.is_empty());
        assert!(config.user_agent.starts_with("es-scroll/"));
    }

    #[test]
    fn test_from_parts() {
        let config = ClientConfig::from_parts("http", "localhost", "9200");
        assert_eq!(config.base_url, "http://localhost:9200");
        assert_eq!(config.base().unwrap().port(), Some(9200));
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        assert!(ClientConfig::from_url("https://search.internal:9243").is_ok());

        let err = ClientConfig::from_url("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = ClientConfig::from_url("mailto:ops@example.com").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("http://es:9200")
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .content_type("application/json")
            .header("Authorization", "Basic abc")
            .user_agent("indexer/2.0")
            .build();

        assert_eq!(config.base_url, "http://es:9200");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.connect_timeout_seconds, 2);
        assert_eq!(config.content_type, "application/json");
        assert_eq!(
            config.headers.get("Authorization"),
            Some(&"Basic abc".to_string())
        );
        assert_eq!(config.user_agent, "indexer/2.0");
    }

    #[test]
    fn test_from_yaml_applies_defaults() {
        let config = ClientConfig::from_yaml("base_url: http://es:9200\ntimeout_seconds: 5\n").unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.connect_timeout_seconds, 10);
        assert_eq!(config.content_type, DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_from_yaml_accepts_json() {
        let config = ClientConfig::from_yaml(
            r#"{"base_url": "http://es:9200", "headers": {"X-Tenant": "acme"}}"#,
        )
        .unwrap();
        assert_eq!(config.headers.get("X-Tenant"), Some(&"acme".to_string()));
    }

    #[test]
    fn test_builder_rounds_sub_second_timeouts_up() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_millis(500))
            .connect_timeout(Duration::from_millis(1500))
            .build();

        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let config = ClientConfig::builder().timeout(Duration::ZERO).build();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));

        let err = ClientConfig::from_yaml("base_url: http://es:9200\ntimeout_seconds: 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));

        let err =
            ClientConfig::from_yaml("base_url: http://es:9200\nconnect_timeout_seconds: 0\n")
                .unwrap_err();
        assert!(err.to_string().contains("connect_timeout_seconds"));
    }

    #[test]
    fn test_from_yaml_missing_base_url() {
        let err = ClientConfig::from_yaml("timeout_seconds: 5\n").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://es.example.com:9200").unwrap();
        writeln!(file, "content_type: application/json").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "http://es.example.com:9200");
        assert_eq!(config.content_type, "application/json");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
