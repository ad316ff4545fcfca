//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "STOREFRONT_API_BASE_URL";

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Shopping session defaults.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse file contents, choosing the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Replace the base URL with `value` when it is set and non-empty.
    pub fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let url = self.api.base_url.trim();
        let host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"));
        match host {
            None => errors.push(format!(
                "api.base_url '{}' must start with http:// or https://",
                url
            )),
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                errors.push(format!("api.base_url '{}' has no host", url))
            }
            Some(_) => {}
        }

        if self.api.user_agent.trim().is_empty() {
            errors.push("api.user_agent must not be empty".to_string());
        }

        if let Some(user) = &self.session.default_user {
            if user.trim().is_empty() {
                errors.push("session.default_user must not be blank".to_string());
            }
        }

        errors
    }
}

/// API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_user_agent() -> String {
    format!("storefront/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// User id preselected when shopping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront CLI configuration

[api]
# Overridden by the {env} environment variable.
base_url = "{base_url}"
user_agent = "{user_agent}"

[session]
# default_user = "<user id>"
"#,
        env = BASE_URL_ENV,
        base_url = default_base_url(),
        user_agent = default_user_agent(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = CliConfig::parse("storefront.toml", "").unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:3000");
        assert!(config.session.default_user.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_toml_and_json() {
        let toml = r#"
            [api]
            base_url = "https://shop.example.com"

            [session]
            default_user = "u1"
        "#;
        let config = CliConfig::parse("storefront.toml", toml).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.session.default_user.as_deref(), Some("u1"));

        let json = r#"{"api": {"base_url": "http://localhost:8080"}}"#;
        let config = CliConfig::parse("storefront.json", json).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = CliConfig::parse("storefront.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_base_url_override() {
        let mut config = CliConfig::default();
        config.apply_base_url_override(Some("  ".to_string()));
        assert_eq!(config.api.base_url, "http://127.0.0.1:3000");

        config.apply_base_url_override(Some("https://api.example.com".to_string()));
        assert_eq!(config.api.base_url, "https://api.example.com");

        config.apply_base_url_override(None);
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:3000".to_string();
        assert_eq!(config.validate().len(), 1);

        config.api.base_url = "http://".to_string();
        assert_eq!(config.validate().len(), 1);
    }
}
