//! JSON responses printed by the CLI
//!
//! Each operation has its own response shape; all of them carry a
//! top-level `success` flag that decides the exit code.

use atlassian_domain::tool::{Category, ExecutionResult, RegistryError, ToolMetadata};
use serde::Serialize;
use serde_json::Value;

/// `--list-tools` response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub tools: Vec<String>,
    pub count: usize,
    /// Category name, or `all`
    pub category: String,
}

impl ListResponse {
    pub fn new(tools: Vec<String>, category: Option<Category>) -> Self {
        Self {
            success: true,
            count: tools.len(),
            tools,
            category: category.map_or("all", |c| c.as_str()).to_string(),
        }
    }
}

/// `--search` response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub tools: Vec<String>,
    pub count: usize,
    pub query: String,
}

impl SearchResponse {
    pub fn new(tools: Vec<String>, query: &str) -> Self {
        Self {
            success: true,
            count: tools.len(),
            tools,
            query: query.to_string(),
        }
    }
}

/// `--schema` response
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SchemaResponse {
    Found {
        success: bool,
        tool: String,
        description: String,
        category: Category,
        input_schema: Value,
        output_schema: Value,
    },
    Failed {
        success: bool,
        error: String,
    },
}

impl SchemaResponse {
    pub fn new(tool: &str, metadata: Result<ToolMetadata, RegistryError>) -> Self {
        match metadata {
            Ok(metadata) => SchemaResponse::Found {
                success: true,
                tool: tool.to_string(),
                description: metadata.description,
                category: metadata.category,
                input_schema: metadata.input_schema,
                output_schema: metadata.output_schema,
            },
            Err(e) => SchemaResponse::Failed {
                success: false,
                error: format!("Failed to get schema for '{tool}': {e}"),
            },
        }
    }
}

/// Envelope-shaped report for `--input` that is not JSON
pub fn invalid_input(tool: &str, message: &str) -> ExecutionResult {
    ExecutionResult::failure(tool, format!("Invalid JSON input: {message}"))
}

/// Pretty-print with two-space indentation
pub fn render<T: Serialize>(response: &T) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| {
        format!("{{\n  \"success\": false,\n  \"error\": \"Failed to render output: {e}\"\n}}")
    })
}

/// The `success` flag of a rendered response
pub fn succeeded<T: Serialize>(response: &T) -> bool {
    serde_json::to_value(response)
        .ok()
        .and_then(|v| v.get("success").and_then(Value::as_bool))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json<T: Serialize>(response: &T) -> Value {
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_list_response() {
        let response = ListResponse::new(vec!["jira_search".to_string()], None);
        assert_eq!(
            to_json(&response),
            json!({"success": true, "tools": ["jira_search"], "count": 1, "category": "all"})
        );

        let response = ListResponse::new(vec![], Some(Category::Confluence));
        assert_eq!(to_json(&response)["category"], "confluence");
        assert!(succeeded(&response));
    }

    #[test]
    fn test_search_response() {
        let response = SearchResponse::new(vec!["a".into(), "b".into()], "comment");
        assert_eq!(to_json(&response)["count"], 2);
        assert_eq!(to_json(&response)["query"], "comment");
    }

    #[test]
    fn test_schema_response() {
        let metadata = ToolMetadata {
            name: "jira_search".to_string(),
            description: "Search".to_string(),
            category: Category::Jira,
            input_schema: json!({"type": "object"}),
            output_schema: json!({"type": "object"}),
            examples: None,
        };
        let value = to_json(&SchemaResponse::new("jira_search", Ok(metadata)));
        assert_eq!(value["tool"], "jira_search");
        assert_eq!(value["category"], "jira");
        assert!(value.get("name").is_none());

        let failed = SchemaResponse::new(
            "jira_nope",
            Err(RegistryError::NotFound("jira_nope".to_string())),
        );
        assert!(!succeeded(&failed));
        assert_eq!(
            to_json(&failed),
            json!({
                "success": false,
                "error": "Failed to get schema for 'jira_nope': Tool not found: jira_nope"
            })
        );
    }

    #[test]
    fn test_invalid_input_envelope() {
        let value = to_json(&invalid_input("jira_search", "expected value at line 1"));
        assert_eq!(value["success"], false);
        assert_eq!(value["tool_name"], "jira_search");
        assert_eq!(value["error"], "Invalid JSON input: expected value at line 1");
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_render_is_indented() {
        let rendered = render(&json!({"success": true}));
        assert_eq!(rendered, "{\n  \"success\": true\n}");
    }

    #[test]
    fn test_execution_envelope_success_flag() {
        assert!(succeeded(&ExecutionResult::success("jira_search", json!({"success": false}))));
        assert!(!succeeded(&ExecutionResult::failure("jira_search", "Tool error: x")));
    }
}
