//! CLI command definitions

use atlassian_domain::tool::Category;
use clap::{Parser, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Tool category filter for `--list-tools`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Jira,
    Confluence,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Jira => Category::Jira,
            CategoryArg::Confluence => Category::Confluence,
        }
    }
}

/// CLI arguments for atlassian-tools
#[derive(Parser, Debug)]
#[command(name = "atlassian-tools")]
#[command(author, version, about = "Discover and execute Jira and Confluence tools")]
#[command(long_about = r#"
Discover and execute Atlassian tools (Jira + Confluence).

Every command prints JSON to stdout. The exit code is 0 when the printed
"success" is true and 1 otherwise.

Connection settings are loaded from (in priority order):
1. JIRA_* / CONFLUENCE_* environment variables
   (JIRA_URL, JIRA_USERNAME, JIRA_API_TOKEN, ...)
2. --config <path>, else ./atlassian.toml
3. ~/.config/atlassian-tools/config.toml

Examples:
  atlassian-tools --list-tools
  atlassian-tools --list-tools --category jira
  atlassian-tools --search comment
  atlassian-tools jira_get_issue --schema
  atlassian-tools jira_get_issue --input '{"issue_key": "PROJ-123"}'
  atlassian-tools confluence_search --input '{"cql": "space = DOCS", "limit": 10}'
"#)]
pub struct Cli {
    /// Name of the tool to inspect or execute
    pub tool_name: Option<String>,

    /// JSON input for the tool (as a string)
    #[arg(long, value_name = "JSON")]
    pub input: Option<String>,

    /// List all available tools
    #[arg(long)]
    pub list_tools: bool,

    /// Restrict --list-tools to one category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// Show input/output schema for the named tool
    #[arg(long)]
    pub schema: bool,

    /// Find tools whose name or description contains QUERY
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What a parsed command line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListTools { category: Option<Category> },
    Search { query: String },
    Schema { tool: String },
    Execute { tool: String, input: Value },
    /// `--input` was not valid JSON
    InvalidInput { tool: String, message: String },
    /// Nothing runnable was requested
    Help,
}

impl Cli {
    /// Resolve flags into a single operation.
    ///
    /// `--list-tools` wins over everything else, then `--search`; the
    /// remaining operations need a tool name.
    pub fn operation(&self) -> Operation {
        if self.list_tools {
            return Operation::ListTools {
                category: self.category.map(Category::from),
            };
        }
        if let Some(query) = &self.search {
            return Operation::Search {
                query: query.clone(),
            };
        }

        let Some(tool) = self.tool_name.clone() else {
            return Operation::Help;
        };
        if self.schema {
            return Operation::Schema { tool };
        }
        match &self.input {
            Some(raw) => match serde_json::from_str(raw) {
                Ok(input) => Operation::Execute { tool, input },
                Err(e) => Operation::InvalidInput {
                    tool,
                    message: e.to_string(),
                },
            },
            None => Operation::Help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("atlassian-tools").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_tools() {
        assert_eq!(
            parse(&["--list-tools"]).operation(),
            Operation::ListTools { category: None }
        );
        assert_eq!(
            parse(&["--list-tools", "--category", "confluence"]).operation(),
            Operation::ListTools {
                category: Some(Category::Confluence)
            }
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let args = ["atlassian-tools", "--list-tools", "--category", "bitbucket"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_schema_and_execute() {
        assert_eq!(
            parse(&["jira_get_issue", "--schema"]).operation(),
            Operation::Schema {
                tool: "jira_get_issue".to_string()
            }
        );
        assert_eq!(
            parse(&["jira_get_issue", "--input", r#"{"issue_key": "PROJ-1"}"#]).operation(),
            Operation::Execute {
                tool: "jira_get_issue".to_string(),
                input: json!({"issue_key": "PROJ-1"}),
            }
        );
    }

    #[test]
    fn test_non_object_input_still_executes() {
        assert_eq!(
            parse(&["jira_search", "--input", "[1, 2]"]).operation(),
            Operation::Execute {
                tool: "jira_search".to_string(),
                input: json!([1, 2]),
            }
        );
    }

    #[test]
    fn test_invalid_json_input() {
        match parse(&["jira_search", "--input", "{not json"]).operation() {
            Operation::InvalidInput { tool, message } => {
                assert_eq!(tool, "jira_search");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn test_help_when_nothing_runnable() {
        assert_eq!(parse(&[]).operation(), Operation::Help);
        assert_eq!(parse(&["jira_get_issue"]).operation(), Operation::Help);
        assert_eq!(parse(&["--schema"]).operation(), Operation::Help);
    }

    #[test]
    fn test_verbosity_counts() {
        assert_eq!(parse(&["-vv", "--list-tools"]).verbose, 2);
    }
}
