//! Tool identity entities
//!
//! Every tool name has the form `<category>_<operation>`. The category is the
//! part before the first [`CATEGORY_SEPARATOR`] and must be one of the
//! supported [`Category`] values; the operation is free-form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RegistryError;

/// Separator between the category prefix and the operation in a tool name
pub const CATEGORY_SEPARATOR: char = '_';

/// Fixed, closed set of tool categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Jira,
    Confluence,
}

impl Category {
    /// All supported categories, in discovery order
    pub const ALL: [Category; 2] = [Category::Jira, Category::Confluence];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Jira => "jira",
            Category::Confluence => "confluence",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jira" => Ok(Category::Jira),
            "confluence" => Ok(Category::Confluence),
            other => Err(RegistryError::InvalidCategory(other.to_string())),
        }
    }
}

/// A validated tool name split at its first separator.
///
/// Parsing only checks the *shape* of the name; whether a tool with this
/// name exists is decided by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolName {
    full: String,
    category: Category,
    operation_start: usize,
}

impl ToolName {
    /// Parse `<category>_<operation>`.
    ///
    /// Fails with [`RegistryError::InvalidName`] when there is no separator
    /// and with [`RegistryError::InvalidCategory`] when the prefix is not a
    /// supported category.
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let Some((prefix, _)) = name.split_once(CATEGORY_SEPARATOR) else {
            return Err(RegistryError::InvalidName(name.to_string()));
        };
        let category = prefix.parse()?;

        Ok(Self {
            full: name.to_string(),
            category,
            operation_start: prefix.len() + CATEGORY_SEPARATOR.len_utf8(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn operation(&self) -> &str {
        &self.full[self.operation_start..]
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Read-only discovery snapshot of a loaded tool.
///
/// Created on the first successful metadata request for a tool name and
/// cached by the registry for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMetadata {
    /// Tool name (e.g., `jira_get_issue`)
    pub name: String,
    /// Human-readable description; empty when the tool documents nothing
    pub description: String,
    /// Category derived from the name prefix
    pub category: Category,
    /// JSON Schema of the accepted input
    pub input_schema: Value,
    /// JSON Schema of the successful output
    pub output_schema: Value,
    /// Optional usage examples
    #[serde(default)]
    pub examples: Option<Vec<Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_name() {
        let name = ToolName::parse("jira_get_issue").unwrap();
        assert_eq!(name.category(), Category::Jira);
        assert_eq!(name.operation(), "get_issue");
        assert_eq!(name.as_str(), "jira_get_issue");
    }

    #[test]
    fn test_parse_splits_at_first_separator() {
        let name = ToolName::parse("confluence_get_page_children").unwrap();
        assert_eq!(name.category(), Category::Confluence);
        assert_eq!(name.operation(), "get_page_children");
    }

    #[test]
    fn test_parse_without_separator() {
        let err = ToolName::parse("invalid").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName(ref n) if n == "invalid"));
        assert_eq!(err.to_string(), "Invalid tool name format: invalid");
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = ToolName::parse("bogus_thing").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCategory(ref c) if c == "bogus"));
        assert_eq!(err.to_string(), "Invalid tool category: bogus");
    }

    #[test]
    fn test_parse_empty_operation_is_well_formed() {
        // Lookup decides existence, parsing only checks the shape
        let name = ToolName::parse("jira_").unwrap();
        assert_eq!(name.operation(), "");
    }

    #[test]
    fn test_category_round_trip_and_display() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(Category::Confluence.to_string(), "confluence");
        assert_eq!(serde_json::to_value(Category::Jira).unwrap(), "jira");
    }

    #[test]
    fn test_metadata_serializes_all_fields() {
        let metadata = ToolMetadata {
            name: "jira_get_issue".to_string(),
            description: "Get an issue".to_string(),
            category: Category::Jira,
            input_schema: serde_json::json!({"type": "object"}),
            output_schema: serde_json::json!({"type": "object"}),
            examples: None,
        };

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["category"], "jira");
        assert_eq!(value["input_schema"]["type"], "object");
        assert!(value["examples"].is_null());
    }
}
