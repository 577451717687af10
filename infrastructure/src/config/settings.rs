//! Raw configuration data types
//!
//! These structs mirror the `[jira]` / `[confluence]` TOML tables and the
//! `JIRA_*` / `CONFLUENCE_*` environment variables. Credentials stay
//! optional here; they are only required when a client is first built.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::AtlassianError;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default retry budget (carried, not acted on)
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Complete configuration (raw structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlassianSettings {
    pub jira: ServiceSettings,
    pub confluence: ServiceSettings,
}

/// Connection settings for one Atlassian product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Whether this product's tools are offered at all
    pub enabled: bool,
    /// Instance URL, e.g. `https://example.atlassian.net`
    pub url: Option<String>,
    /// Account email
    pub username: Option<String>,
    pub api_token: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
    pub max_retries: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
            username: None,
            api_token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ServiceSettings {
    /// Check required values and produce a usable connection config.
    ///
    /// `env_prefix` names the variables in error messages (`JIRA`,
    /// `CONFLUENCE`).
    pub fn connection(&self, env_prefix: &str) -> Result<ConnectionConfig, AtlassianError> {
        let required = |value: &Option<String>, key: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    AtlassianError::Configuration(format!(
                        "{env_prefix}_{key} environment variable is required"
                    ))
                })
        };

        Ok(ConnectionConfig {
            base_url: required(&self.url, "URL")?,
            username: required(&self.username, "USERNAME")?,
            api_token: required(&self.api_token, "API_TOKEN")?,
            timeout: Duration::from_secs(self.timeout.max(1)),
        })
    }
}

/// Validated connection parameters for [`AtlassianHttpClient`](crate::http::AtlassianHttpClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub base_url: String,
    pub username: String,
    pub api_token: String,
    pub timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ServiceSettings {
        ServiceSettings {
            url: Some("https://example.atlassian.net".to_string()),
            username: Some("bot@example.com".to_string()),
            api_token: Some("secret".to_string()),
            ..ServiceSettings::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = AtlassianSettings::default();
        assert!(settings.jira.enabled);
        assert_eq!(settings.jira.timeout, 30);
        assert_eq!(settings.confluence.max_retries, 3);
        assert!(settings.confluence.url.is_none());
    }

    #[test]
    fn test_connection_requires_url_first() {
        let err = ServiceSettings::default().connection("JIRA").unwrap_err();
        assert_eq!(
            err,
            AtlassianError::Configuration("JIRA_URL environment variable is required".to_string())
        );
    }

    #[test]
    fn test_connection_reports_each_missing_value() {
        let mut settings = complete();
        settings.api_token = Some("   ".to_string());
        let err = settings.connection("CONFLUENCE").unwrap_err();
        assert_eq!(err.to_string(), "CONFLUENCE_API_TOKEN environment variable is required");

        settings.api_token = Some("secret".to_string());
        settings.username = None;
        let err = settings.connection("CONFLUENCE").unwrap_err();
        assert!(err.to_string().contains("CONFLUENCE_USERNAME"));
    }

    #[test]
    fn test_connection_success() {
        let connection = complete().connection("JIRA").unwrap();
        assert_eq!(connection.base_url, "https://example.atlassian.net");
        assert_eq!(connection.timeout, Duration::from_secs(30));
    }
}
