//! Infrastructure layer for atlassian-tools
//!
//! This crate contains the adapters behind the application layer's ports:
//! the Jira and Confluence category modules, their REST services, the
//! HTTP client and configuration loading.

pub mod catalog;
pub mod config;
pub mod confluence;
pub mod container;
pub mod http;
pub mod jira;

mod shape;

// Re-export commonly used types
pub use catalog::AtlassianModuleResolver;
pub use config::{AtlassianSettings, ConfigError, ConfigLoader, ServiceSettings};
pub use confluence::{ConfluenceModule, ConfluenceService};
pub use container::LazyService;
pub use http::{AtlassianError, AtlassianHttpClient, HttpTransport, Result};
pub use jira::{JiraModule, JiraService};
