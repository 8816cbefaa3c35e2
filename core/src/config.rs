use serde::{Deserialize, Serialize};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Root of the Gemini REST API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration struct for Gemini API
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub api_base_url: Option<String>,
    pub temperature: Option<f32>,
}

impl GeminiConfig {
    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
            temperature: other.temperature.or(self.temperature),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_other_values() {
        let base = GeminiConfig {
            api_key: Some("file-key".to_string()),
            model_name: Some("gemini-2.0-flash".to_string()),
            api_base_url: None,
            temperature: Some(0.2),
        };
        let overrides = GeminiConfig {
            api_key: Some("env-key".to_string()),
            ..Default::default()
        };

        let merged = base.merge(&overrides);
        assert_eq!(merged.api_key.as_deref(), Some("env-key"));
        assert_eq!(merged.model_name(), "gemini-2.0-flash");
        assert_eq!(merged.temperature, Some(0.2));
        assert_eq!(merged.api_base_url(), DEFAULT_API_BASE);
    }

    #[test]
    fn defaults_fall_back_to_flash_model() {
        let config = GeminiConfig::default();
        assert_eq!(config.model_name(), "gemini-2.5-flash");
        assert!(config.api_key.is_none());
    }
}
