//! Configuration loader with multi-source merging

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Value,
};
use thiserror::Error;
use tracing::warn;

use super::settings::AtlassianSettings;

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "atlassian.toml";

/// Dotenv file read from the working directory
pub const DOTENV_FILE: &str = ".env";

/// Environment prefixes and the config table each one fills
const ENV_TABLES: [(&str, &str); 2] = [("JIRA_", "jira"), ("CONFLUENCE_", "confluence")];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `JIRA_*` / `CONFLUENCE_*` environment variables
    /// 2. The same variables in `./.env`
    /// 3. Explicit config path (if provided), else `./atlassian.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/atlassian-tools/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<AtlassianSettings, ConfigError> {
        let figment = Self::files(config_path)?
            .merge(Self::dotenv(Path::new(DOTENV_FILE)))
            .merge(Self::env());
        Self::extract(figment)
    }

    /// Load only the file layers, ignoring the environment
    pub fn load_files(config_path: Option<&Path>) -> Result<AtlassianSettings, ConfigError> {
        Self::extract(Self::files(config_path)?)
    }

    fn files(config_path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(AtlassianSettings::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(path) = Self::project_config_path() {
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        Ok(figment)
    }

    /// `JIRA_API_TOKEN` -> `jira.api_token`, likewise for `CONFLUENCE_*`
    fn env() -> Figment {
        ENV_TABLES.iter().fold(Figment::new(), |figment, &(prefix, table)| {
            figment.merge(Env::prefixed(prefix).map(move |key| format!("{table}.{}", key.as_str()).into()))
        })
    }

    /// `JIRA_*` / `CONFLUENCE_*` entries of a dotenv file, read without
    /// touching the process environment. A missing file contributes nothing.
    fn dotenv(path: &Path) -> Figment {
        let Ok(entries) = dotenvy::from_path_iter(path) else {
            return Figment::new();
        };

        entries
            .filter_map(|entry| match entry {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping malformed dotenv line");
                    None
                }
            })
            .filter_map(|(key, value)| Some((Self::env_key(&key)?, value)))
            .fold(Figment::new(), |figment, (key, value)| {
                // Parsed the same way `Env` parses process variables
                let value: Value = value.parse().unwrap_or_else(|never| match never {});
                figment.merge(Serialized::default(&key, value))
            })
    }

    /// `JIRA_API_TOKEN` -> `jira.api_token`
    fn env_key(name: &str) -> Option<String> {
        let upper = name.to_ascii_uppercase();
        ENV_TABLES.iter().find_map(|(prefix, table)| {
            upper
                .strip_prefix(*prefix)
                .filter(|rest| !rest.is_empty())
                .map(|rest| format!("{table}.{}", rest.to_ascii_lowercase()))
        })
    }

    fn extract(figment: Figment) -> Result<AtlassianSettings, ConfigError> {
        let settings = figment.extract().map_err(Box::new)?;
        Ok(settings)
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("atlassian-tools").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }
}
