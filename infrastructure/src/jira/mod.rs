//! Jira category
//!
//! [`JiraModule`] exports every Jira tool. All tools share one lazily built
//! [`JiraService`], so connection settings are only checked when a tool runs.

pub mod adf;
pub mod models;
pub mod service;
pub mod tools;

use std::sync::Arc;

use atlassian_domain::tool::{Category, CategoryModule, ToolEntry, into_tool};

use crate::config::ServiceSettings;
use crate::container::LazyService;
use crate::http::{AtlassianError, AtlassianHttpClient};

pub use service::JiraService;
pub use tools::JiraHandle;

/// Prefix of the environment variables holding Jira connection settings
pub const ENV_PREFIX: &str = "JIRA";

pub struct JiraModule {
    exports: Vec<ToolEntry>,
}

impl JiraModule {
    pub fn new(service: JiraHandle) -> Self {
        use tools::*;

        macro_rules! entry {
            ($name:literal, $tool:ident) => {{
                let service = Arc::clone(&service);
                ToolEntry::new($name, move || into_tool($tool::new(Arc::clone(&service))))
            }};
        }

        Self {
            exports: vec![
                entry!("jira_get_issue", GetIssueTool),
                entry!("jira_search", SearchTool),
                entry!("jira_get_transitions", GetTransitionsTool),
                entry!("jira_get_comments", GetCommentsTool),
                entry!("jira_get_all_projects", GetAllProjectsTool),
                entry!("jira_get_user_profile", GetUserProfileTool),
                entry!("jira_get_fields", GetFieldsTool),
                entry!("jira_get_priorities", GetPrioritiesTool),
                entry!("jira_get_resolutions", GetResolutionsTool),
                entry!("jira_create_issue", CreateIssueTool),
                entry!("jira_update_issue", UpdateIssueTool),
                entry!("jira_transition_issue", TransitionIssueTool),
                entry!("jira_add_comment", AddCommentTool),
                entry!("jira_update_comment", UpdateCommentTool),
                entry!("jira_delete_comment", DeleteCommentTool),
                entry!("jira_assign_issue", AssignIssueTool),
                entry!("jira_delete_issue", DeleteIssueTool),
            ],
        }
    }

    /// Module whose service connects with `settings` on first use
    pub fn from_settings(settings: &ServiceSettings) -> Self {
        let settings = settings.clone();
        let service = LazyService::new(move || {
            let connection = settings.connection(ENV_PREFIX)?;
            let client = AtlassianHttpClient::new(&connection)?;
            Ok(JiraService::new(Arc::new(client)))
        });
        Self::new(Arc::new(service))
    }

    /// Module whose tools all report `error` instead of connecting
    pub fn misconfigured(error: AtlassianError) -> Self {
        let service = LazyService::<JiraService>::new(move || Err(error.clone()));
        Self::new(Arc::new(service))
    }
}

impl CategoryModule for JiraModule {
    fn category(&self) -> Category {
        Category::Jira
    }

    fn exports(&self) -> &[ToolEntry] {
        &self.exports
    }
}
