//! Client configuration
//!
//! The API key and base URL are captured once into a [`Config`] value that is
//! handed to [`DocusealClient`](crate::DocusealClient). Nothing in the client
//! reads the process environment on its own.

/// Hosted DocuSeal endpoint, used unless a self-hosted URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.docuseal.co";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "DOCUSEAL_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "DOCUSEAL_BASE_URL";

/// Connection settings for the DocuSeal API
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    api_key: Option<String>,
}

impl Config {
    /// Create a configuration for `base_url` with no API key
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            api_key: None,
        }
    }

    /// Read `DOCUSEAL_API_KEY` and `DOCUSEAL_BASE_URL` from the environment.
    ///
    /// A missing key is not an error here; it surfaces on the first request.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_default();

        let config = Self::new(base_url);
        match std::env::var(API_KEY_ENV) {
            Ok(key) => config.with_api_key(key),
            Err(_) => config,
        }
    }

    /// Point at a different deployment, keeping the API key
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    /// Set the API key. Blank keys are treated as absent.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        self.api_key = if api_key.trim().is_empty() {
            None
        } else {
            Some(api_key)
        };
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Join the base URL and an endpoint path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(base_url: String) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_hosted_endpoint() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = Config::new("https://sign.example.com/api/");
        assert_eq!(config.base_url(), "https://sign.example.com/api");
        assert_eq!(
            config.url_for("/templates/1"),
            "https://sign.example.com/api/templates/1"
        );
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        assert_eq!(Config::new("  ").base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn with_base_url_keeps_api_key() {
        let config = Config::default()
            .with_api_key("k")
            .with_base_url("http://localhost:3000/");
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.api_key(), Some("k"));
    }

    #[test]
    fn blank_api_key_is_absent() {
        let config = Config::default().with_api_key("   ");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = Config::default().with_api_key("secret-token");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("redacted"));
    }
}
