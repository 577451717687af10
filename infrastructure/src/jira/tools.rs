//! Jira tools
//!
//! Each tool resolves the shared [`JiraService`] lazily and turns every
//! Atlassian failure into its own `{success: false, error}` output. The
//! only `Err` a tool returns is for failures outside the Atlassian
//! taxonomy, which the execution engine reports as an execution error.

use std::sync::Arc;

use async_trait::async_trait;
use atlassian_domain::tool::{ToolFailure, TypedTool};

use super::models::{
    AckOutput, AddCommentInput, AddCommentOutput, AssignIssueInput, CreateIssueInput,
    CreateIssueOutput, DeleteCommentInput, DeleteIssueInput, GetCommentsInput, GetCommentsOutput,
    GetFieldsOutput, GetIssueInput, GetIssueOutput, GetPrioritiesOutput, GetProjectsOutput,
    GetResolutionsOutput, GetTransitionsOutput, GetUserProfileOutput, IssueFields, IssueKeyInput,
    NoInput, SearchInput, SearchOutput, TransitionIssueInput, UpdateCommentInput, UpdateIssueInput,
};
use super::service::{IssueDetail, JiraService};
use crate::container::LazyService;
use crate::http::AtlassianError;

/// Shared, lazily built Jira service
pub type JiraHandle = Arc<LazyService<JiraService>>;

/// Message for a failure on an issue-keyed operation
fn issue_error(issue_key: &str, error: AtlassianError) -> String {
    match error {
        AtlassianError::NotFound(_) => format!("Issue {issue_key} not found"),
        other => other.to_string(),
    }
}

/// `jira_get_issue` words its failures more specifically
fn get_issue_error(issue_key: &str, error: AtlassianError) -> String {
    match error {
        AtlassianError::NotFound(_) => format!("Issue {issue_key} not found"),
        e if e.is_auth() => "Authentication failed. Check your credentials".to_string(),
        AtlassianError::Configuration(message) => message,
        other => format!("Error fetching issue: {other}"),
    }
}

macro_rules! jira_tool {
    ($tool:ident) => {
        pub struct $tool {
            service: JiraHandle,
        }

        impl $tool {
            pub fn new(service: JiraHandle) -> Self {
                Self { service }
            }
        }
    };
}

jira_tool!(GetIssueTool);
jira_tool!(SearchTool);
jira_tool!(GetTransitionsTool);
jira_tool!(GetCommentsTool);
jira_tool!(GetAllProjectsTool);
jira_tool!(GetUserProfileTool);
jira_tool!(GetFieldsTool);
jira_tool!(GetPrioritiesTool);
jira_tool!(GetResolutionsTool);
jira_tool!(CreateIssueTool);
jira_tool!(UpdateIssueTool);
jira_tool!(TransitionIssueTool);
jira_tool!(AddCommentTool);
jira_tool!(UpdateCommentTool);
jira_tool!(DeleteCommentTool);
jira_tool!(AssignIssueTool);
jira_tool!(DeleteIssueTool);

// =============================================================================
// Read tools
// =============================================================================

#[async_trait]
impl TypedTool for GetIssueTool {
    type Input = GetIssueInput;
    type Output = GetIssueOutput;

    fn name(&self) -> &'static str {
        "jira_get_issue"
    }

    fn description(&self) -> &'static str {
        "Get details of a specific Jira issue, including fields, comments, \
         attachments and optional expanded data such as the changelog."
    }

    async fn call(&self, input: GetIssueInput) -> Result<GetIssueOutput, ToolFailure> {
        let detail = IssueDetail {
            comment_limit: input.comment_limit as usize,
            include_expanded: input.expand.as_deref().is_some_and(|e| !e.is_empty()),
        };
        let result = async {
            self.service
                .get()
                .await?
                .get_issue(
                    &input.issue_key,
                    input.fields.as_deref().filter(|f| !f.is_empty()),
                    input.expand.as_deref(),
                    detail,
                )
                .await
        }
        .await;

        Ok(match result {
            Ok(issue) => GetIssueOutput::ok(issue),
            Err(e) => GetIssueOutput::failed(get_issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for SearchTool {
    type Input = SearchInput;
    type Output = SearchOutput;

    fn name(&self) -> &'static str {
        "jira_search"
    }

    fn description(&self) -> &'static str {
        "Search Jira issues using JQL."
    }

    async fn call(&self, input: SearchInput) -> Result<SearchOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .search(&input.jql, input.max_results, input.start_at, &input.fields)
                .await
        }
        .await;

        Ok(match result {
            Ok(page) => SearchOutput::ok(page.issues, page.total),
            Err(e) => SearchOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for GetTransitionsTool {
    type Input = IssueKeyInput;
    type Output = GetTransitionsOutput;

    fn name(&self) -> &'static str {
        "jira_get_transitions"
    }

    fn description(&self) -> &'static str {
        "List the workflow transitions currently available for an issue."
    }

    async fn call(&self, input: IssueKeyInput) -> Result<GetTransitionsOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_transitions(&input.issue_key).await }.await;

        Ok(match result {
            Ok(transitions) => GetTransitionsOutput::ok(transitions),
            Err(e) => GetTransitionsOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for GetCommentsTool {
    type Input = GetCommentsInput;
    type Output = GetCommentsOutput;

    fn name(&self) -> &'static str {
        "jira_get_comments"
    }

    fn description(&self) -> &'static str {
        "Get comments on a Jira issue as plain text."
    }

    async fn call(&self, input: GetCommentsInput) -> Result<GetCommentsOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .get_comments(&input.issue_key, input.max_results)
                .await
        }
        .await;

        Ok(match result {
            Ok(comments) => GetCommentsOutput::ok(comments),
            Err(e) => GetCommentsOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for GetAllProjectsTool {
    type Input = NoInput;
    type Output = GetProjectsOutput;

    fn name(&self) -> &'static str {
        "jira_get_all_projects"
    }

    fn description(&self) -> &'static str {
        "List all Jira projects visible to the configured account."
    }

    async fn call(&self, _input: NoInput) -> Result<GetProjectsOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_projects().await }.await;

        Ok(match result {
            Ok(projects) => GetProjectsOutput::ok(projects),
            Err(e) => GetProjectsOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for GetUserProfileTool {
    type Input = NoInput;
    type Output = GetUserProfileOutput;

    fn name(&self) -> &'static str {
        "jira_get_user_profile"
    }

    fn description(&self) -> &'static str {
        "Get the profile of the configured Jira account."
    }

    async fn call(&self, _input: NoInput) -> Result<GetUserProfileOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_user_profile().await }.await;

        Ok(match result {
            Ok(profile) => GetUserProfileOutput::ok(profile),
            Err(e) => GetUserProfileOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for GetFieldsTool {
    type Input = NoInput;
    type Output = GetFieldsOutput;

    fn name(&self) -> &'static str {
        "jira_get_fields"
    }

    fn description(&self) -> &'static str {
        "List all system and custom Jira fields."
    }

    async fn call(&self, _input: NoInput) -> Result<GetFieldsOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_fields().await }.await;

        Ok(match result {
            Ok(fields) => GetFieldsOutput::ok(fields),
            Err(e) => GetFieldsOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for GetPrioritiesTool {
    type Input = NoInput;
    type Output = GetPrioritiesOutput;

    fn name(&self) -> &'static str {
        "jira_get_priorities"
    }

    fn description(&self) -> &'static str {
        "List available Jira issue priorities."
    }

    async fn call(&self, _input: NoInput) -> Result<GetPrioritiesOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_priorities().await }.await;

        Ok(match result {
            Ok(priorities) => GetPrioritiesOutput::ok(priorities),
            Err(e) => GetPrioritiesOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for GetResolutionsTool {
    type Input = NoInput;
    type Output = GetResolutionsOutput;

    fn name(&self) -> &'static str {
        "jira_get_resolutions"
    }

    fn description(&self) -> &'static str {
        "List available Jira issue resolutions."
    }

    async fn call(&self, _input: NoInput) -> Result<GetResolutionsOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_resolutions().await }.await;

        Ok(match result {
            Ok(resolutions) => GetResolutionsOutput::ok(resolutions),
            Err(e) => GetResolutionsOutput::failed(e.to_string()),
        })
    }
}

// =============================================================================
// Write tools
// =============================================================================

#[async_trait]
impl TypedTool for CreateIssueTool {
    type Input = CreateIssueInput;
    type Output = CreateIssueOutput;

    fn name(&self) -> &'static str {
        "jira_create_issue"
    }

    fn description(&self) -> &'static str {
        "Create a new Jira issue."
    }

    async fn call(&self, input: CreateIssueInput) -> Result<CreateIssueOutput, ToolFailure> {
        let fields = IssueFields {
            summary: Some(input.summary),
            description: input.description,
            priority: input.priority,
            assignee: input.assignee,
            labels: input.labels,
            components: input.components,
        };
        let result = async {
            self.service
                .get()
                .await?
                .create_issue(&input.project_key, &input.issue_type, fields)
                .await
        }
        .await;

        Ok(match result {
            Ok(created) => CreateIssueOutput::ok(
                created.key.unwrap_or_default(),
                created.id.unwrap_or_default(),
            ),
            Err(e) => CreateIssueOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for UpdateIssueTool {
    type Input = UpdateIssueInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "jira_update_issue"
    }

    fn description(&self) -> &'static str {
        "Update fields of an existing Jira issue. Omitted fields are left unchanged."
    }

    async fn call(&self, input: UpdateIssueInput) -> Result<AckOutput, ToolFailure> {
        let fields = IssueFields {
            summary: input.summary,
            description: input.description,
            priority: input.priority,
            assignee: input.assignee,
            labels: input.labels,
            components: None,
        };
        let result = async { self.service.get().await?.update_issue(&input.issue_key, fields).await }.await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for TransitionIssueTool {
    type Input = TransitionIssueInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "jira_transition_issue"
    }

    fn description(&self) -> &'static str {
        "Move a Jira issue through a workflow transition, optionally with a comment."
    }

    async fn call(&self, input: TransitionIssueInput) -> Result<AckOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .transition_issue(&input.issue_key, &input.transition_id, input.comment.as_deref())
                .await
        }
        .await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for AddCommentTool {
    type Input = AddCommentInput;
    type Output = AddCommentOutput;

    fn name(&self) -> &'static str {
        "jira_add_comment"
    }

    fn description(&self) -> &'static str {
        "Add a plain-text comment to a Jira issue."
    }

    async fn call(&self, input: AddCommentInput) -> Result<AddCommentOutput, ToolFailure> {
        let result = async { self.service.get().await?.add_comment(&input.issue_key, &input.body).await }.await;

        Ok(match result {
            Ok(comment) => AddCommentOutput::ok(comment.id.unwrap_or_default()),
            Err(e) => AddCommentOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for UpdateCommentTool {
    type Input = UpdateCommentInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "jira_update_comment"
    }

    fn description(&self) -> &'static str {
        "Replace the body of a comment on a Jira issue."
    }

    async fn call(&self, input: UpdateCommentInput) -> Result<AckOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .update_comment(&input.issue_key, &input.comment_id, &input.body)
                .await
        }
        .await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for DeleteCommentTool {
    type Input = DeleteCommentInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "jira_delete_comment"
    }

    fn description(&self) -> &'static str {
        "Delete a comment from a Jira issue."
    }

    async fn call(&self, input: DeleteCommentInput) -> Result<AckOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .delete_comment(&input.issue_key, &input.comment_id)
                .await
        }
        .await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for AssignIssueTool {
    type Input = AssignIssueInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "jira_assign_issue"
    }

    fn description(&self) -> &'static str {
        "Assign a Jira issue to a user by account ID, or unassign it."
    }

    async fn call(&self, input: AssignIssueInput) -> Result<AckOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .assign_issue(&input.issue_key, input.account_id.as_deref())
                .await
        }
        .await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}

#[async_trait]
impl TypedTool for DeleteIssueTool {
    type Input = DeleteIssueInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "jira_delete_issue"
    }

    fn description(&self) -> &'static str {
        "Delete a Jira issue, optionally with its subtasks."
    }

    async fn call(&self, input: DeleteIssueInput) -> Result<AckOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .delete_issue(&input.issue_key, input.delete_subtasks)
                .await
        }
        .await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(issue_error(&input.issue_key, e)),
        })
    }
}
