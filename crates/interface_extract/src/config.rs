//! Extraction-service configuration
//!
//! The extraction API key and call parameters are loaded once at process
//! start and passed by reference into whatever drives the service call.
//! The engine core never sees this struct.

use serde::Deserialize;

/// Runtime configuration for the extraction-service call
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extraction-service API key
    pub api_key: String,
    /// Model used for document extraction
    pub model: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Upload size ceiling in megabytes
    pub max_upload_mb: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            request_timeout_secs: 60,
            max_upload_mb: 20,
        }
    }
}

impl ExtractionConfig {
    /// Loads configuration from `EXTRACTION_`-prefixed environment
    /// variables, falling back to defaults for absent fields
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("EXTRACTION"))
            .build()?
            .try_deserialize()
    }

    /// Returns the upload ceiling in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    /// Returns true when an API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sensible() {
        let config = ExtractionConfig::default();

        assert!(!config.has_api_key());
        assert_eq!(config.max_upload_mb, 20);
        assert_eq!(config.max_upload_bytes(), 20 * 1024 * 1024);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_api_key_presence_ignores_whitespace() {
        let config = ExtractionConfig {
            api_key: "   ".into(),
            ..ExtractionConfig::default()
        };
        assert!(!config.has_api_key());

        let config = ExtractionConfig {
            api_key: "key-123".into(),
            ..ExtractionConfig::default()
        };
        assert!(config.has_api_key());
    }
}
