//! Metadata extraction
//!
//! Turns a loaded tool into its [`ToolMetadata`] snapshot. This is the one
//! place tool well-formedness is checked, and it happens late: at metadata
//! time, never at discovery.

use atlassian_domain::tool::{Category, RegistryError, Tool, ToolMetadata};
use serde_json::Value;

/// Derive discovery metadata from a loaded tool.
///
/// A missing description becomes the empty string. An empty name or a
/// schema that is not a JSON object fails with
/// [`RegistryError::MissingMetadata`].
pub fn extract_metadata(tool: &dyn Tool, category: Category) -> Result<ToolMetadata, RegistryError> {
    let name = tool.name();
    if name.is_empty() {
        return Err(missing("<unnamed>", "name"));
    }

    let input_schema = structural(tool.input_schema()).ok_or_else(|| missing(name, "input schema"))?;
    let output_schema = structural(tool.output_schema()).ok_or_else(|| missing(name, "output schema"))?;

    Ok(ToolMetadata {
        name: name.to_string(),
        description: tool.description().trim().to_string(),
        category,
        input_schema,
        output_schema,
        examples: None,
    })
}

fn structural(schema: &Value) -> Option<Value> {
    schema.is_object().then(|| schema.clone())
}

fn missing(name: &str, what: &str) -> RegistryError {
    RegistryError::MissingMetadata {
        name: name.to_string(),
        missing: what.to_string(),
    }
}
