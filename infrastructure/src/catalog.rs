//! Category module resolution
//!
//! [`AtlassianModuleResolver`] is the adapter behind the application
//! layer's [`CategoryModuleResolver`] port. Modules are constructed up
//! front, which is cheap: no tool is built and no connection is made until
//! the registry asks for one.

use std::sync::Arc;

use atlassian_application::CategoryModuleResolver;
use atlassian_domain::tool::{Category, CategoryModule, ModuleLoadError};
use tracing::{debug, warn};

use crate::config::{AtlassianSettings, ConfigError};
use crate::http::AtlassianError;
use crate::confluence::ConfluenceModule;
use crate::jira::JiraModule;

/// Resolves `jira` and `confluence` to their modules.
///
/// A category disabled in configuration fails to resolve, so discovery
/// reports it as empty and loading its tools fails with a module error.
pub struct AtlassianModuleResolver {
    jira: Option<Arc<JiraModule>>,
    confluence: Option<Arc<ConfluenceModule>>,
}

impl AtlassianModuleResolver {
    pub fn new(jira: Option<JiraModule>, confluence: Option<ConfluenceModule>) -> Self {
        Self {
            jira: jira.map(Arc::new),
            confluence: confluence.map(Arc::new),
        }
    }

    pub fn from_settings(settings: &AtlassianSettings) -> Self {
        let jira = settings
            .jira
            .enabled
            .then(|| JiraModule::from_settings(&settings.jira));
        let confluence = settings
            .confluence
            .enabled
            .then(|| ConfluenceModule::from_settings(&settings.confluence));
        Self::new(jira, confluence)
    }

    /// Resolver over the outcome of [`ConfigLoader::load`](crate::ConfigLoader::load).
    ///
    /// Invalid configuration does not stop discovery: both categories stay
    /// available and every tool reports the configuration error when run.
    pub fn from_config(loaded: Result<AtlassianSettings, ConfigError>) -> Self {
        match loaded {
            Ok(settings) => {
                debug!(
                    jira_enabled = settings.jira.enabled,
                    confluence_enabled = settings.confluence.enabled,
                    "Configuration loaded"
                );
                Self::from_settings(&settings)
            }
            Err(e) => {
                warn!(error = %e, "Configuration unusable, tools will report it when run");
                let error = AtlassianError::Configuration(e.to_string());
                Self::new(
                    Some(JiraModule::misconfigured(error.clone())),
                    Some(ConfluenceModule::misconfigured(error)),
                )
            }
        }
    }
}

impl CategoryModuleResolver for AtlassianModuleResolver {
    fn resolve(&self, category: Category) -> Result<Arc<dyn CategoryModule>, ModuleLoadError> {
        debug!(category = category.as_str(), "Resolving category module");
        let module: Option<Arc<dyn CategoryModule>> = match category {
            Category::Jira => self.jira.clone().map(|m| m as Arc<dyn CategoryModule>),
            Category::Confluence => self.confluence.clone().map(|m| m as Arc<dyn CategoryModule>),
        };
        module.ok_or_else(|| ModuleLoadError::new(category, "disabled by configuration"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use atlassian_application::{ExecuteToolUseCase, ToolRegistry};
    use serde_json::json;

    fn registry(settings: &AtlassianSettings) -> Arc<ToolRegistry> {
        let resolver = AtlassianModuleResolver::from_settings(settings);
        Arc::new(ToolRegistry::new(Arc::new(resolver)))
    }

    #[test]
    fn test_discovers_every_tool() {
        let registry = registry(&AtlassianSettings::default());

        let jira = registry.discover(Some(Category::Jira));
        assert_eq!(jira.len(), 17);
        assert!(jira.contains(&"jira_get_issue".to_string()));

        let confluence = registry.discover(Some(Category::Confluence));
        assert_eq!(confluence.len(), 11);

        let all = registry.discover(None);
        assert_eq!(all.len(), 28);
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
        assert!(registry.loaded_names().is_empty());
    }

    #[test]
    fn test_disabled_category_is_empty() {
        let mut settings = AtlassianSettings::default();
        settings.confluence.enabled = false;
        let registry = registry(&settings);

        assert!(registry.discover(Some(Category::Confluence)).is_empty());
        assert_eq!(registry.discover(None).len(), 17);

        let err = registry.load("confluence_get_page").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Failed to load confluence tool module: disabled by configuration"
        );
    }

    #[test]
    fn test_every_tool_has_metadata() {
        let registry = registry(&AtlassianSettings::default());
        for name in registry.discover(None) {
            let metadata = registry.get_metadata(&name).unwrap();
            assert_eq!(metadata.name, name);
            assert!(metadata.input_schema.is_object());
            assert_eq!(metadata.output_schema["properties"]["success"]["type"], "boolean");
        }
    }

    #[tokio::test]
    async fn test_missing_connection_settings_reported_in_data() {
        let engine = ExecuteToolUseCase::new(registry(&AtlassianSettings::default()));
        let result = engine
            .execute("jira_get_issue", json!({"issue_key": "PROJ-123"}))
            .await;

        assert!(result.is_success());
        let data = result.data().unwrap();
        assert_eq!(data["success"], false);
        assert!(data["error"].as_str().unwrap().contains("JIRA_URL"));
    }

    #[test]
    fn test_bad_config_value_still_discovers() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("JIRA_TIMEOUT", "abc");

            let loaded = ConfigLoader::load(None);
            assert!(loaded.is_err());
            let registry = Arc::new(ToolRegistry::new(Arc::new(AtlassianModuleResolver::from_config(loaded))));
            assert_eq!(registry.discover(None).len(), 28);
            assert!(registry.get_metadata("jira_get_issue").is_ok());

            let engine = ExecuteToolUseCase::new(registry);
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let result = runtime.block_on(engine.execute("jira_get_issue", json!({"issue_key": "PROJ-1"})));

            assert!(result.is_success());
            let data = result.data().unwrap();
            assert_eq!(data["success"], false);
            let error = data["error"].as_str().unwrap();
            assert!(error.starts_with("Invalid configuration: "));
            assert!(error.to_lowercase().contains("timeout"));
            Ok(())
        });
    }

    #[test]
    fn test_loosely_typed_input_accepted() {
        let engine = ExecuteToolUseCase::new(registry(&AtlassianSettings::default()));

        let cases = [
            ("jira_get_issue", json!({"issue_key": "PROJ-1", "comment_limit": "5"})),
            ("jira_search", json!({"jql": "project = PROJ", "max_results": 10.0})),
            ("jira_delete_issue", json!({"issue_key": "PROJ-1", "delete_subtasks": "true"})),
            ("confluence_update_page", json!({"page_id": "1", "version_number": "3"})),
        ];
        for (name, input) in cases {
            assert_eq!(engine.validate_only(name, &input), (true, None), "{name}");
        }

        let (valid, message) =
            engine.validate_only("jira_search", &json!({"jql": "x", "max_results": 10.5}));
        assert!(!valid);
        assert!(message.unwrap().contains("max_results"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_service() {
        let engine = ExecuteToolUseCase::new(registry(&AtlassianSettings::default()));

        let result = engine
            .execute("jira_search", json!({"jql": "x", "max_results": 500}))
            .await;
        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert!(error.starts_with("Input validation error: "));
        assert!(error.contains("max_results"));

        let (valid, _) = engine.validate_only("confluence_add_label", &json!({"page_id": "1"}));
        assert!(!valid);
    }
}
