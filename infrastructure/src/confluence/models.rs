//! Input and output types for Confluence tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shape::tool_output;

fn default_limit() -> u32 {
    25
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Essential fields of a page or other content item
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct PageSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_key: Option<String>,
    /// Current version number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Body in storage format, when it was expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Relative web UI link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SearchResults {
    pub results: Vec<PageSummary>,
    pub total: u64,
    pub start: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Ancestor {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PageComment {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Body in storage format
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CreatedPage {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CreatedContent {
    pub id: Option<String>,
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Tool inputs
// ---------------------------------------------------------------------------

/// Input for `confluence_get_page`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPageInput {
    /// Confluence page ID
    #[schemars(length(min = 1))]
    pub page_id: String,
    /// Comma-separated fields to expand (e.g., 'body.storage,version')
    #[serde(default)]
    pub expand: Option<String>,
}

/// Input for `confluence_search`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// Confluence Query Language (CQL) query
    #[schemars(length(min = 1))]
    pub cql: String,
    /// Maximum number of results to return
    #[serde(default = "default_limit")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: u32,
    /// Starting index for pagination
    #[serde(default)]
    pub start: u32,
}

/// Input for tools that list items under a page
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PageListInput {
    /// Confluence page ID
    #[schemars(length(min = 1))]
    pub page_id: String,
    /// Maximum number of items to return
    #[serde(default = "default_limit")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: u32,
}

/// Input naming one page
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PageIdInput {
    /// Confluence page ID
    #[schemars(length(min = 1))]
    pub page_id: String,
}

/// Input for `confluence_create_page`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePageInput {
    /// Space key where the page will be created
    #[schemars(length(min = 1))]
    pub space_key: String,
    #[schemars(length(min = 1))]
    pub title: String,
    /// Page body content (HTML or storage format)
    pub body: String,
    /// Parent page ID
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Input for `confluence_update_page`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdatePageInput {
    /// Page ID to update
    #[schemars(length(min = 1))]
    pub page_id: String,
    /// New page title; the current title is kept when omitted
    #[serde(default)]
    pub title: Option<String>,
    /// New page body; the current body is kept when omitted
    #[serde(default)]
    pub body: Option<String>,
    /// Current version number (required for update)
    #[schemars(range(min = 1))]
    pub version_number: u64,
}

/// Input for `confluence_add_label`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddLabelInput {
    /// Page ID to add the label to
    #[schemars(length(min = 1))]
    pub page_id: String,
    #[schemars(length(min = 1))]
    pub label: String,
}

/// Input for `confluence_add_comment`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddCommentInput {
    /// Page ID to comment on
    #[schemars(length(min = 1))]
    pub page_id: String,
    /// Comment body content
    #[schemars(length(min = 1))]
    pub body: String,
}

// ---------------------------------------------------------------------------
// Tool outputs
// ---------------------------------------------------------------------------

tool_output!(GetPageOutput { page: PageSummary });

tool_output!(
    /// Output for `confluence_search`
    SearchOutput {
        results: Vec<PageSummary>,
        /// Total number of results
        total: u64,
    }
);

tool_output!(GetPageChildrenOutput { children: Vec<PageSummary> });
tool_output!(GetPageAncestorsOutput { ancestors: Vec<Ancestor> });
tool_output!(GetLabelsOutput { labels: Vec<String> });
tool_output!(GetCommentsOutput { comments: Vec<PageComment> });

tool_output!(
    /// Output for `confluence_create_page`
    CreatePageOutput {
        page_id: String,
        /// Web UI link to the created page
        page_url: String,
    }
);

tool_output!(
    /// Output for `confluence_update_page`
    UpdatePageOutput {
        /// Version number after the update
        new_version: u64,
    }
);

tool_output!(AddCommentOutput { comment_id: String });

tool_output!(
    /// Output for write tools that return nothing but success
    AckOutput {}
);
