//! Jira service
//!
//! One method per Jira Cloud REST v3 operation. Responses are reshaped into
//! the compact records in [`models`](super::models); rich text is converted
//! to and from ADF here so tools only ever see plain text.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::adf;
use super::models::{
    CreatedComment, CreatedIssue, FieldInfo, IssueComment, IssueFields, IssueSummary, NamedItem,
    Project, SearchPage, Transition, TransitionTarget, UserProfile,
};
use crate::http::{ApiRequest, HttpTransport, Result};
use crate::shape::{as_items, items, str_at, value_at};

const API: &str = "/rest/api/3";

/// How much of a fetched issue to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueDetail {
    /// Maximum comments to include; 0 drops them
    pub comment_limit: usize,
    /// Keep `changelog` / `transitions` sections returned by `expand`
    pub include_expanded: bool,
}

/// Jira REST operations over an [`HttpTransport`]
#[derive(Clone)]
pub struct JiraService {
    transport: Arc<dyn HttpTransport>,
}

impl JiraService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    // =========================================================================
    // Read operations
    // =========================================================================

    /// Fetch one issue and reshape it into a detailed view
    pub async fn get_issue(
        &self,
        issue_key: &str,
        fields: Option<&str>,
        expand: Option<&str>,
        detail: IssueDetail,
    ) -> Result<Value> {
        let request = ApiRequest::get(format!("{API}/issue/{issue_key}"))
            .with_query("fields", fields.unwrap_or("*all"))
            .with_optional_query("expand", expand.filter(|e| !e.is_empty()));
        let raw = self.transport.send(request).await?;
        Ok(issue_detail(&raw, detail))
    }

    pub async fn search(
        &self,
        jql: &str,
        max_results: u32,
        start_at: u32,
        fields: &str,
    ) -> Result<SearchPage> {
        let mut request = ApiRequest::get(format!("{API}/search/jql"))
            .with_query("jql", jql)
            .with_query("maxResults", max_results)
            .with_query("startAt", start_at);
        for field in fields.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            request = request.with_query("fields", field);
        }

        let data = self.transport.send(request).await?;
        Ok(SearchPage {
            issues: items(&data, "issues").iter().map(issue_summary).collect(),
            total: data.get("total").and_then(Value::as_u64).unwrap_or(0),
            start_at,
            max_results,
        })
    }

    pub async fn get_transitions(&self, issue_key: &str) -> Result<Vec<Transition>> {
        let data = self
            .transport
            .send(ApiRequest::get(format!("{API}/issue/{issue_key}/transitions")))
            .await?;

        Ok(items(&data, "transitions")
            .iter()
            .map(|t| Transition {
                id: str_at(t, "/id"),
                name: str_at(t, "/name"),
                to: TransitionTarget {
                    id: str_at(t, "/to/id"),
                    name: str_at(t, "/to/name"),
                    category: str_at(t, "/to/statusCategory/name"),
                },
            })
            .collect())
    }

    pub async fn get_comments(&self, issue_key: &str, max_results: u32) -> Result<Vec<IssueComment>> {
        let request = ApiRequest::get(format!("{API}/issue/{issue_key}/comment"))
            .with_query("maxResults", max_results);
        let data = self.transport.send(request).await?;

        Ok(items(&data, "comments").iter().map(issue_comment).collect())
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        let data = self.transport.send(ApiRequest::get(format!("{API}/project"))).await?;

        Ok(as_items(&data)
            .iter()
            .map(|p| Project {
                id: str_at(p, "/id"),
                key: str_at(p, "/key"),
                name: str_at(p, "/name"),
                project_type: str_at(p, "/projectTypeKey"),
            })
            .collect())
    }

    pub async fn get_user_profile(&self) -> Result<UserProfile> {
        let data = self.transport.send(ApiRequest::get(format!("{API}/myself"))).await?;

        Ok(UserProfile {
            account_id: str_at(&data, "/accountId"),
            display_name: str_at(&data, "/displayName"),
            email: str_at(&data, "/emailAddress"),
            active: data.get("active").and_then(Value::as_bool),
            timezone: str_at(&data, "/timeZone"),
        })
    }

    pub async fn get_fields(&self) -> Result<Vec<FieldInfo>> {
        let data = self.transport.send(ApiRequest::get(format!("{API}/field"))).await?;

        Ok(as_items(&data)
            .iter()
            .map(|f| FieldInfo {
                id: str_at(f, "/id"),
                name: str_at(f, "/name"),
                custom: f.get("custom").and_then(Value::as_bool).unwrap_or(false),
                schema: value_at(f, "/schema"),
            })
            .collect())
    }

    pub async fn get_priorities(&self) -> Result<Vec<NamedItem>> {
        self.named_items("priority").await
    }

    pub async fn get_resolutions(&self) -> Result<Vec<NamedItem>> {
        self.named_items("resolution").await
    }

    async fn named_items(&self, resource: &str) -> Result<Vec<NamedItem>> {
        let data = self.transport.send(ApiRequest::get(format!("{API}/{resource}"))).await?;

        Ok(as_items(&data)
            .iter()
            .map(|item| NamedItem {
                id: str_at(item, "/id"),
                name: str_at(item, "/name"),
                description: str_at(item, "/description"),
            })
            .collect())
    }

    // =========================================================================
    // Write operations
    // =========================================================================

    pub async fn create_issue(
        &self,
        project_key: &str,
        issue_type: &str,
        fields: IssueFields,
    ) -> Result<CreatedIssue> {
        let mut payload = field_payload(fields);
        payload.insert("project".to_string(), json!({"key": project_key}));
        payload.insert("issuetype".to_string(), json!({"name": issue_type}));

        let data = self
            .transport
            .send(ApiRequest::post(format!("{API}/issue"), json!({"fields": payload})))
            .await?;

        Ok(CreatedIssue {
            id: str_at(&data, "/id"),
            key: str_at(&data, "/key"),
            self_url: str_at(&data, "/self"),
        })
    }

    pub async fn update_issue(&self, issue_key: &str, fields: IssueFields) -> Result<()> {
        let payload = field_payload(fields);
        self.transport
            .send(ApiRequest::put(
                format!("{API}/issue/{issue_key}"),
                json!({"fields": payload}),
            ))
            .await?;
        Ok(())
    }

    pub async fn transition_issue(
        &self,
        issue_key: &str,
        transition_id: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        let mut payload = json!({"transition": {"id": transition_id}});
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            payload["update"] = json!({
                "comment": [{"add": {"body": adf::text_document(comment)}}]
            });
        }

        self.transport
            .send(ApiRequest::post(
                format!("{API}/issue/{issue_key}/transitions"),
                payload,
            ))
            .await?;
        Ok(())
    }

    pub async fn add_comment(&self, issue_key: &str, body: &str) -> Result<CreatedComment> {
        let data = self
            .transport
            .send(ApiRequest::post(
                format!("{API}/issue/{issue_key}/comment"),
                json!({"body": adf::text_document(body)}),
            ))
            .await?;

        Ok(CreatedComment {
            id: str_at(&data, "/id"),
            author: str_at(&data, "/author/displayName"),
            created: str_at(&data, "/created"),
        })
    }

    pub async fn update_comment(&self, issue_key: &str, comment_id: &str, body: &str) -> Result<()> {
        self.transport
            .send(ApiRequest::put(
                format!("{API}/issue/{issue_key}/comment/{comment_id}"),
                json!({"body": adf::text_document(body)}),
            ))
            .await?;
        Ok(())
    }

    pub async fn delete_comment(&self, issue_key: &str, comment_id: &str) -> Result<()> {
        self.transport
            .send(ApiRequest::delete(format!(
                "{API}/issue/{issue_key}/comment/{comment_id}"
            )))
            .await?;
        Ok(())
    }

    /// Assign to `account_id`, or unassign when `None`
    pub async fn assign_issue(&self, issue_key: &str, account_id: Option<&str>) -> Result<()> {
        self.transport
            .send(ApiRequest::put(
                format!("{API}/issue/{issue_key}/assignee"),
                json!({"accountId": account_id}),
            ))
            .await?;
        Ok(())
    }

    pub async fn delete_issue(&self, issue_key: &str, delete_subtasks: bool) -> Result<()> {
        let request = ApiRequest::delete(format!("{API}/issue/{issue_key}"))
            .with_query("deleteSubtasks", delete_subtasks);
        self.transport.send(request).await?;
        Ok(())
    }
}

fn field_payload(fields: IssueFields) -> Map<String, Value> {
    let mut payload = Map::new();
    let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);

    if let Some(summary) = present(&fields.summary) {
        payload.insert("summary".to_string(), json!(summary));
    }
    if let Some(description) = present(&fields.description) {
        payload.insert("description".to_string(), adf::text_document(&description));
    }
    if let Some(priority) = present(&fields.priority) {
        payload.insert("priority".to_string(), json!({"name": priority}));
    }
    if let Some(assignee) = present(&fields.assignee) {
        payload.insert("assignee".to_string(), json!({"accountId": assignee}));
    }
    if let Some(labels) = fields.labels.filter(|l| !l.is_empty()) {
        payload.insert("labels".to_string(), json!(labels));
    }
    if let Some(components) = fields.components.filter(|c| !c.is_empty()) {
        let named: Vec<Value> = components.iter().map(|c| json!({"name": c})).collect();
        payload.insert("components".to_string(), Value::Array(named));
    }
    payload
}

fn issue_summary(issue: &Value) -> IssueSummary {
    let labels = issue
        .pointer("/fields/labels")
        .and_then(Value::as_array)
        .filter(|l| !l.is_empty())
        .map(|l| l.iter().filter_map(Value::as_str).map(str::to_string).collect());

    IssueSummary {
        id: str_at(issue, "/id"),
        key: str_at(issue, "/key"),
        summary: str_at(issue, "/fields/summary"),
        status: str_at(issue, "/fields/status/name"),
        issue_type: str_at(issue, "/fields/issuetype/name"),
        assignee: str_at(issue, "/fields/assignee/displayName"),
        reporter: str_at(issue, "/fields/reporter/displayName"),
        priority: str_at(issue, "/fields/priority/name"),
        description: value_at(issue, "/fields/description")
            .map(|d| adf::extract_text(&d))
            .filter(|d| !d.is_empty()),
        labels,
        created: str_at(issue, "/fields/created"),
        updated: str_at(issue, "/fields/updated"),
    }
}

fn issue_comment(raw: &Value) -> IssueComment {
    IssueComment {
        id: str_at(raw, "/id"),
        author: str_at(raw, "/author/displayName"),
        body: raw.get("body").map(adf::extract_text).unwrap_or_default(),
        created: str_at(raw, "/created"),
        updated: str_at(raw, "/updated"),
    }
}

fn person(raw: &Value) -> Value {
    json!({
        "display_name": str_at(raw, "/displayName"),
        "email": str_at(raw, "/emailAddress"),
    })
}

/// Detailed issue view used by `jira_get_issue`.
///
/// Only fields present in the response are emitted, so a narrow `fields`
/// request yields a narrow view.
fn issue_detail(issue: &Value, detail: IssueDetail) -> Value {
    let empty = Map::new();
    let fields = issue.get("fields").and_then(Value::as_object).unwrap_or(&empty);
    let mut out = Map::new();

    if let Some(summary) = fields.get("summary") {
        out.insert("summary".into(), summary.clone());
    }
    if let Some(description) = fields.get("description") {
        out.insert("description".into(), json!(adf::extract_text(description)));
    }
    if let Some(status) = fields.get("status").filter(|s| s.is_object()) {
        out.insert(
            "status".into(),
            json!({
                "name": str_at(status, "/name"),
                "category": str_at(status, "/statusCategory/name"),
            }),
        );
    }
    if let Some(issue_type) = fields.get("issuetype").filter(|t| t.is_object()) {
        out.insert("issue_type".into(), json!({"name": str_at(issue_type, "/name")}));
    }
    if let Some(priority) = fields.get("priority").filter(|p| p.is_object()) {
        out.insert("priority".into(), json!({"name": str_at(priority, "/name")}));
    }
    if let Some(assignee) = fields.get("assignee") {
        let value = if assignee.is_object() { person(assignee) } else { Value::Null };
        out.insert("assignee".into(), value);
    }
    if let Some(reporter) = fields.get("reporter").filter(|r| r.is_object()) {
        out.insert("reporter".into(), person(reporter));
    }
    for key in ["created", "updated", "labels"] {
        if let Some(value) = fields.get(key) {
            out.insert(key.into(), value.clone());
        }
    }
    if let Some(components) = fields.get("components").and_then(Value::as_array) {
        let names: Vec<Value> = components
            .iter()
            .filter_map(|c| c.get("name").cloned())
            .collect();
        out.insert("components".into(), Value::Array(names));
    }

    if detail.comment_limit > 0 {
        let comments = fields
            .get("comment")
            .and_then(|c| c.get("comments"))
            .and_then(Value::as_array);
        if let Some(comments) = comments {
            let kept: Vec<Value> = comments
                .iter()
                .filter(|c| c.is_object())
                .take(detail.comment_limit)
                .map(|c| {
                    json!({
                        "author": str_at(c, "/author/displayName"),
                        "body": c.get("body").map(adf::extract_text).unwrap_or_default(),
                        "created": str_at(c, "/created"),
                    })
                })
                .collect();
            out.insert("comments".into(), Value::Array(kept));
        }
    }

    if let Some(attachments) = fields.get("attachment").and_then(Value::as_array) {
        let files: Vec<Value> = attachments
            .iter()
            .filter(|a| a.is_object())
            .map(|a| {
                json!({
                    "filename": str_at(a, "/filename"),
                    "size": a.get("size").cloned().unwrap_or(Value::Null),
                    "content_type": str_at(a, "/mimeType"),
                    "url": str_at(a, "/content"),
                })
            })
            .collect();
        out.insert("attachments".into(), Value::Array(files));
    }

    let mut result = json!({
        "key": str_at(issue, "/key"),
        "id": str_at(issue, "/id"),
        "self": str_at(issue, "/self"),
        "fields": Value::Object(out),
    });

    if detail.include_expanded {
        for key in ["changelog", "transitions"] {
            if let Some(section) = issue.get(key) {
                result[key] = section.clone();
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use crate::http::{AtlassianError, Method};

    fn service(transport: &Arc<MockTransport>) -> JiraService {
        JiraService::new(transport.clone())
    }

    fn raw_issue() -> Value {
        json!({
            "id": "10001",
            "key": "PROJ-1",
            "self": "https://example.atlassian.net/rest/api/3/issue/10001",
            "fields": {
                "summary": "Fix login",
                "description": adf::text_document("Users cannot log in"),
                "status": {"name": "In Progress", "statusCategory": {"name": "In Progress"}},
                "issuetype": {"name": "Bug"},
                "priority": {"name": "High"},
                "assignee": null,
                "reporter": {"displayName": "Ada", "emailAddress": "ada@example.com"},
                "labels": ["auth"],
                "components": [{"name": "web"}, {"id": "2"}],
                "comment": {"comments": [
                    {"author": {"displayName": "Bob"}, "body": adf::text_document("first"), "created": "t1"},
                    {"author": {"displayName": "Eve"}, "body": adf::text_document("second"), "created": "t2"},
                ]},
                "attachment": [{"filename": "log.txt", "size": 12, "mimeType": "text/plain", "content": "https://x/1"}],
            },
            "changelog": {"histories": []},
        })
    }

    #[tokio::test]
    async fn test_get_issue_shapes_detail() {
        let transport = Arc::new(MockTransport::new().respond(raw_issue()));
        let detail = IssueDetail {
            comment_limit: 1,
            include_expanded: true,
        };
        let issue = service(&transport)
            .get_issue("PROJ-1", None, Some("changelog"), detail)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.path, "/rest/api/3/issue/PROJ-1");
        assert_eq!(request.query_value("fields"), Some("*all"));
        assert_eq!(request.query_value("expand"), Some("changelog"));

        assert_eq!(issue["key"], "PROJ-1");
        let fields = &issue["fields"];
        assert_eq!(fields["description"], "Users cannot log in");
        assert_eq!(fields["status"]["category"], "In Progress");
        assert!(fields["assignee"].is_null());
        assert_eq!(fields["reporter"]["display_name"], "Ada");
        assert_eq!(fields["components"], json!(["web"]));
        assert_eq!(fields["comments"].as_array().unwrap().len(), 1);
        assert_eq!(fields["comments"][0]["body"], "first");
        assert_eq!(fields["attachments"][0]["content_type"], "text/plain");
        assert!(issue["changelog"].is_object());
    }

    #[tokio::test]
    async fn test_get_issue_without_comments_or_expand() {
        let transport = Arc::new(MockTransport::new().respond(raw_issue()));
        let detail = IssueDetail {
            comment_limit: 0,
            include_expanded: false,
        };
        let issue = service(&transport)
            .get_issue("PROJ-1", Some("summary"), None, detail)
            .await
            .unwrap();

        assert!(issue["fields"].get("comments").is_none());
        assert!(issue.get("changelog").is_none());
        assert_eq!(transport.last_request().query_value("fields"), Some("summary"));
    }

    #[tokio::test]
    async fn test_search_sends_repeated_fields() {
        let transport = Arc::new(MockTransport::new().respond(json!({
            "issues": [raw_issue()],
            "total": 7,
        })));
        let page = service(&transport)
            .search("project = PROJ", 10, 5, "summary, status")
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.path, "/rest/api/3/search/jql");
        assert_eq!(request.query_value("maxResults"), Some("10"));
        let fields: Vec<&str> = request
            .query
            .iter()
            .filter(|(k, _)| k == "fields")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(fields, vec!["summary", "status"]);

        assert_eq!(page.total, 7);
        assert_eq!(page.start_at, 5);
        let issue = &page.issues[0];
        assert_eq!(issue.status.as_deref(), Some("In Progress"));
        assert_eq!(issue.description.as_deref(), Some("Users cannot log in"));
        assert!(issue.assignee.is_none());
        assert_eq!(issue.labels, Some(vec!["auth".to_string()]));
    }

    #[tokio::test]
    async fn test_read_collections() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(json!({"transitions": [
                    {"id": "31", "name": "Done", "to": {"id": "3", "name": "Done", "statusCategory": {"name": "Done"}}}
                ]}))
                .respond(json!([{"id": "1", "key": "PROJ", "name": "Project", "projectTypeKey": "software"}]))
                .respond(json!([{"id": "customfield_1", "name": "Story Points", "custom": true, "schema": {"type": "number"}}]))
                .respond(json!([{"id": "1", "name": "High", "description": "Urgent"}])),
        );
        let jira = service(&transport);

        let transitions = jira.get_transitions("PROJ-1").await.unwrap();
        assert_eq!(transitions[0].to.category.as_deref(), Some("Done"));

        let projects = jira.get_projects().await.unwrap();
        assert_eq!(projects[0].project_type.as_deref(), Some("software"));

        let fields = jira.get_fields().await.unwrap();
        assert!(fields[0].custom);
        assert_eq!(fields[0].schema, Some(json!({"type": "number"})));

        let priorities = jira.get_priorities().await.unwrap();
        assert_eq!(priorities[0].name.as_deref(), Some("High"));

        let paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/rest/api/3/issue/PROJ-1/transitions",
                "/rest/api/3/project",
                "/rest/api/3/field",
                "/rest/api/3/priority",
            ]
        );
    }

    #[tokio::test]
    async fn test_create_issue_payload() {
        let transport = Arc::new(MockTransport::new().respond(json!({"id": "10002", "key": "PROJ-2", "self": "u"})));
        let fields = IssueFields {
            summary: Some("New thing".to_string()),
            description: Some("Details".to_string()),
            priority: Some(String::new()),
            labels: Some(vec!["a".to_string()]),
            components: Some(vec!["api".to_string()]),
            ..IssueFields::default()
        };
        let created = service(&transport).create_issue("PROJ", "Bug", fields).await.unwrap();
        assert_eq!(created.key.as_deref(), Some("PROJ-2"));

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        let body = request.body.unwrap();
        let fields = &body["fields"];
        assert_eq!(fields["project"]["key"], "PROJ");
        assert_eq!(fields["issuetype"]["name"], "Bug");
        assert_eq!(fields["description"]["type"], "doc");
        assert_eq!(fields["components"], json!([{"name": "api"}]));
        assert!(fields.get("priority").is_none());
        assert!(fields.get("assignee").is_none());
    }

    #[tokio::test]
    async fn test_write_requests() {
        let transport = Arc::new(MockTransport::new());
        let jira = service(&transport);

        jira.transition_issue("PROJ-1", "31", Some("done")).await.unwrap();
        jira.assign_issue("PROJ-1", None).await.unwrap();
        jira.delete_issue("PROJ-1", true).await.unwrap();
        jira.delete_comment("PROJ-1", "9").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].body.as_ref().unwrap()["transition"]["id"], "31");
        assert!(requests[0].body.as_ref().unwrap()["update"]["comment"].is_array());
        assert_eq!(requests[1].path, "/rest/api/3/issue/PROJ-1/assignee");
        assert_eq!(requests[1].body, Some(json!({"accountId": null})));
        assert_eq!(requests[2].query_value("deleteSubtasks"), Some("true"));
        assert_eq!(requests[3].method, Method::Delete);
        assert_eq!(requests[3].path, "/rest/api/3/issue/PROJ-1/comment/9");
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let transport = Arc::new(
            MockTransport::new().fail(AtlassianError::from_status(404, "Issue does not exist", None)),
        );
        let err = service(&transport).get_transitions("NOPE-1").await.unwrap_err();
        assert!(matches!(err, AtlassianError::NotFound(_)));
    }
}
