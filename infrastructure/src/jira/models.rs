//! Input and output types for Jira tools
//!
//! Inputs double as the tools' JSON Schemas, so field docs and constraints
//! here are what an agent sees at discovery time.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shape::tool_output;

fn default_comment_limit() -> u32 {
    10
}

fn default_max_results() -> u32 {
    50
}

fn default_search_fields() -> String {
    "*navigable".to_string()
}

fn default_issue_type() -> String {
    "Task".to_string()
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Essential fields of an issue, as returned by search
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct IssueSummary {
    pub id: Option<String>,
    pub key: Option<String>,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Description flattened to plain text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SearchPage {
    pub issues: Vec<IssueSummary>,
    pub total: u64,
    pub start_at: u32,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TransitionTarget {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Status category (To Do, In Progress, Done)
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Transition {
    pub id: Option<String>,
    pub name: Option<String>,
    pub to: TransitionTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct IssueComment {
    pub id: Option<String>,
    pub author: Option<String>,
    /// Comment body flattened to plain text
    pub body: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Project {
    pub id: Option<String>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub project_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct UserProfile {
    pub account_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct FieldInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub custom: bool,
    pub schema: Option<Value>,
}

/// Priority or resolution
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct NamedItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CreatedIssue {
    pub id: Option<String>,
    pub key: Option<String>,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CreatedComment {
    pub id: Option<String>,
    pub author: Option<String>,
    pub created: Option<String>,
}

/// Field changes for create/update; empty values are left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFields {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub labels: Option<Vec<String>>,
    pub components: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Tool inputs
// ---------------------------------------------------------------------------

/// Input for `jira_get_issue`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetIssueInput {
    /// Jira issue key (e.g., 'PROJ-123', 'BUG-456')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    /// Comma-separated list of fields to return, or '*all' for all fields
    #[serde(default)]
    pub fields: Option<String>,
    /// Comma-separated list of fields to expand, e.g. 'changelog', 'transitions'
    #[serde(default)]
    pub expand: Option<String>,
    /// Maximum number of comments to include (0 for none, max 100)
    #[serde(default = "default_comment_limit")]
    #[schemars(range(max = 100))]
    pub comment_limit: u32,
}

/// Input for `jira_search`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// JQL query string (e.g., 'project = PROJ AND status = Open')
    #[schemars(length(min = 1))]
    pub jql: String,
    /// Maximum results to return (1-100)
    #[serde(default = "default_max_results")]
    #[schemars(range(min = 1, max = 100))]
    pub max_results: u32,
    /// Starting index for pagination
    #[serde(default)]
    pub start_at: u32,
    /// Comma-separated fields to return
    #[serde(default = "default_search_fields")]
    pub fields: String,
}

/// Input naming one issue
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IssueKeyInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
}

/// Input for `jira_get_comments`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCommentsInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    /// Maximum comments to return (1-100)
    #[serde(default = "default_max_results")]
    #[schemars(range(min = 1, max = 100))]
    pub max_results: u32,
}

/// Input for tools that take no arguments
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoInput {}

/// Input for `jira_create_issue`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateIssueInput {
    /// Project key (e.g., 'PROJ')
    #[schemars(length(min = 1))]
    pub project_key: String,
    /// Issue summary/title
    #[schemars(length(min = 1))]
    pub summary: String,
    /// Issue type name (e.g., 'Task', 'Bug', 'Story')
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
    /// Plain-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Priority name (e.g., 'High')
    #[serde(default)]
    pub priority: Option<String>,
    /// Assignee account ID
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Component names
    #[serde(default)]
    pub components: Option<Vec<String>>,
}

/// Input for `jira_update_issue`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateIssueInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// Plain-text description
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    /// Assignee account ID
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// Input for `jira_transition_issue`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TransitionIssueInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    /// Transition ID, see `jira_get_transitions`
    #[schemars(length(min = 1))]
    pub transition_id: String,
    /// Optional comment added with the transition
    #[serde(default)]
    pub comment: Option<String>,
}

/// Input for `jira_add_comment`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddCommentInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    /// Plain-text comment body
    #[schemars(length(min = 1))]
    pub body: String,
}

/// Input for `jira_update_comment`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCommentInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    #[schemars(length(min = 1))]
    pub comment_id: String,
    /// New plain-text comment body
    #[schemars(length(min = 1))]
    pub body: String,
}

/// Input for `jira_delete_comment`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteCommentInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    #[schemars(length(min = 1))]
    pub comment_id: String,
}

/// Input for `jira_assign_issue`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AssignIssueInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    /// Assignee account ID; omit or null to unassign
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Input for `jira_delete_issue`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteIssueInput {
    /// Jira issue key (e.g., 'PROJ-123')
    #[schemars(length(min = 1))]
    pub issue_key: String,
    /// Also delete the issue's subtasks
    #[serde(default)]
    pub delete_subtasks: bool,
}

// ---------------------------------------------------------------------------
// Tool outputs
// ---------------------------------------------------------------------------

tool_output!(
    /// Output for `jira_get_issue`
    GetIssueOutput {
        /// Issue data with requested fields
        issue: Value,
    }
);

tool_output!(
    /// Output for `jira_search`
    SearchOutput {
        issues: Vec<IssueSummary>,
        /// Total number of matching issues
        total: u64,
    }
);

tool_output!(GetTransitionsOutput { transitions: Vec<Transition> });
tool_output!(GetCommentsOutput { comments: Vec<IssueComment> });
tool_output!(GetProjectsOutput { projects: Vec<Project> });
tool_output!(GetUserProfileOutput { profile: UserProfile });
tool_output!(GetFieldsOutput { fields: Vec<FieldInfo> });
tool_output!(GetPrioritiesOutput { priorities: Vec<NamedItem> });
tool_output!(GetResolutionsOutput { resolutions: Vec<NamedItem> });

tool_output!(
    /// Output for `jira_create_issue`
    CreateIssueOutput {
        /// Key of the created issue
        issue_key: String,
        issue_id: String,
    }
);

tool_output!(
    /// Output for `jira_add_comment`
    AddCommentOutput {
        comment_id: String,
    }
);

tool_output!(
    /// Output for write tools that return nothing but success
    AckOutput {}
);
