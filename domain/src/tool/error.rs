//! Registry error taxonomy
//!
//! These are raised by tool-name parsing, module resolution, lookup and
//! metadata extraction. The execution engine flattens all of them into the
//! `"Tool error: ..."` envelope message.

use thiserror::Error;

use super::entities::Category;

/// A category's defining module could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load {category} tool module: {reason}")]
pub struct ModuleLoadError {
    pub category: Category,
    pub reason: String,
}

impl ModuleLoadError {
    pub fn new(category: Category, reason: impl Into<String>) -> Self {
        Self {
            category,
            reason: reason.into(),
        }
    }
}

/// Errors produced while resolving a tool name to a loaded tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The name has no `<category>_` prefix
    #[error("Invalid tool name format: {0}")]
    InvalidName(String),

    /// The prefix is not a supported category
    #[error("Invalid tool category: {0}")]
    InvalidCategory(String),

    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadError),

    /// No export of the resolved module declares this name
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The loaded tool lacks a name or a usable schema
    #[error("Tool '{name}' is missing required metadata: {missing}")]
    MissingMetadata { name: String, missing: String },
}

impl RegistryError {
    /// Short kind label, used in diagnostics and tests
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::InvalidName(_) => "InvalidName",
            RegistryError::InvalidCategory(_) => "InvalidCategory",
            RegistryError::ModuleLoad(_) => "ModuleLoadError",
            RegistryError::NotFound(_) => "NotFound",
            RegistryError::MissingMetadata { .. } => "MissingMetadata",
        }
    }
}
