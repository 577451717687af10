//! Confluence category

pub mod models;
pub mod service;
pub mod tools;

use std::sync::Arc;

use atlassian_domain::tool::{Category, CategoryModule, ToolEntry, into_tool};

use crate::config::ServiceSettings;
use crate::container::LazyService;
use crate::http::{AtlassianError, AtlassianHttpClient};

pub use service::ConfluenceService;
pub use tools::ConfluenceHandle;

/// Prefix of the environment variables holding Confluence connection settings
pub const ENV_PREFIX: &str = "CONFLUENCE";

pub struct ConfluenceModule {
    exports: Vec<ToolEntry>,
}

impl ConfluenceModule {
    pub fn new(service: ConfluenceHandle) -> Self {
        use tools::*;

        macro_rules! entry {
            ($name:literal, $tool:ident) => {{
                let service = Arc::clone(&service);
                ToolEntry::new($name, move || into_tool($tool::new(Arc::clone(&service))))
            }};
        }

        Self {
            exports: vec![
                entry!("confluence_get_page", GetPageTool),
                entry!("confluence_search", SearchTool),
                entry!("confluence_get_page_children", GetPageChildrenTool),
                entry!("confluence_get_page_ancestors", GetPageAncestorsTool),
                entry!("confluence_get_labels", GetLabelsTool),
                entry!("confluence_get_comments", GetCommentsTool),
                entry!("confluence_create_page", CreatePageTool),
                entry!("confluence_update_page", UpdatePageTool),
                entry!("confluence_delete_page", DeletePageTool),
                entry!("confluence_add_label", AddLabelTool),
                entry!("confluence_add_comment", AddCommentTool),
            ],
        }
    }

    pub fn from_settings(settings: &ServiceSettings) -> Self {
        let settings = settings.clone();
        let service = LazyService::new(move || {
            let connection = settings.connection(ENV_PREFIX)?;
            let client = AtlassianHttpClient::new(&connection)?;
            Ok(ConfluenceService::new(Arc::new(client)))
        });
        Self::new(Arc::new(service))
    }

    /// Module whose tools all report `error` instead of connecting
    pub fn misconfigured(error: AtlassianError) -> Self {
        let service = LazyService::<ConfluenceService>::new(move || Err(error.clone()));
        Self::new(Arc::new(service))
    }
}

impl CategoryModule for ConfluenceModule {
    fn category(&self) -> Category {
        Category::Confluence
    }

    fn exports(&self) -> &[ToolEntry] {
        &self.exports
    }
}
