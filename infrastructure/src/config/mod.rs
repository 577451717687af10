//! Configuration loading for atlassian-tools
//!
//! The priority order (highest to lowest):
//!
//! 1. `JIRA_*` / `CONFLUENCE_*` environment variables
//! 2. The same variables in `./.env`
//! 3. `--config <path>` specified file, else `./atlassian.toml`
//! 4. Global config: `$XDG_CONFIG_HOME/atlassian-tools/config.toml`
//! 5. Default values

mod loader;
mod settings;

pub use loader::{ConfigError, ConfigLoader, DOTENV_FILE, PROJECT_CONFIG_FILE};
pub use settings::{
    AtlassianSettings, ConnectionConfig, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, ServiceSettings,
};
