//! Catalog helpers
//!
//! Convenience entry points for callers that want plain names or JSON
//! rather than registry types.

use atlassian_domain::tool::{Category, RegistryError};
use serde_json::{Value, json};

use crate::registry::ToolRegistry;

/// All tool names, optionally restricted to one category
pub fn list_tools(registry: &ToolRegistry, category: Option<Category>) -> Vec<String> {
    registry.discover(category)
}

/// Tool names matching `query` by name or description
pub fn search_tools(registry: &ToolRegistry, query: &str) -> Vec<String> {
    registry.search(query)
}

/// Metadata for one tool as a JSON object
pub fn get_tool_info(registry: &ToolRegistry, name: &str) -> Result<Value, RegistryError> {
    let metadata = registry.get_metadata(name)?;
    Ok(json!({
        "name": metadata.name,
        "description": metadata.description,
        "category": metadata.category.as_str(),
        "input_schema": metadata.input_schema,
        "output_schema": metadata.output_schema,
        "examples": metadata.examples,
    }))
}
