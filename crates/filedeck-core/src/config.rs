//! Base URLs for the file API and the static file server.

/// API base used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
/// File-serving base used when nothing else is configured.
pub const DEFAULT_FILE_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Endpoints the clients talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    file_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_FILE_BASE_URL)
    }
}

impl ClientConfig {
    /// Build a config; the API base loses any trailing slash, the file base is
    /// kept verbatim because stored paths are appended to it as-is.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>, file_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            file_base_url: file_base_url.into().trim().to_string(),
        }
    }

    /// Build a config from optional overrides; blank values fall back to defaults.
    #[must_use]
    pub fn from_overrides(api_base_url: Option<&str>, file_base_url: Option<&str>) -> Self {
        let pick = |value: Option<&str>, fallback: &str| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self::new(
            pick(api_base_url, DEFAULT_API_BASE_URL),
            pick(file_base_url, DEFAULT_FILE_BASE_URL),
        )
    }

    /// API base without trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// File-serving base exactly as configured.
    #[must_use]
    pub fn file_base_url(&self) -> &str {
        &self.file_base_url
    }

    /// Absolute URL for an API path such as `/users/7`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// Public URL of a stored file.
    #[must_use]
    pub fn file_url(&self, file_path: &str) -> String {
        format!("{}{file_path}", self.file_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = ClientConfig::new("https://files.test/api/", "https://files.test/");
        assert_eq!(config.endpoint("/users/7"), "https://files.test/api/users/7");
        assert_eq!(config.endpoint("/upload/"), "https://files.test/api/upload/");
        assert_eq!(config.endpoint("search"), "https://files.test/api/search");
    }

    #[test]
    fn file_url_concatenates_stored_path() {
        let config = ClientConfig::new("https://files.test/api", "https://cdn.test/storage/");
        assert_eq!(
            config.file_url("uploads/a.png"),
            "https://cdn.test/storage/uploads/a.png"
        );
    }

    #[test]
    fn blank_overrides_use_defaults() {
        let config = ClientConfig::from_overrides(Some("  "), None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        let custom = ClientConfig::from_overrides(Some("http://api.local/"), Some("http://f/"));
        assert_eq!(custom.api_base_url(), "http://api.local");
        assert_eq!(custom.file_base_url(), "http://f/");
    }
}
