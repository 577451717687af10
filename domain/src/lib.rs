//! Domain layer for atlassian-tools
//!
//! This crate contains the tool contract, tool identity, discovery metadata
//! and the uniform execution envelope. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A tool is a named, schema-described, asynchronously invocable unit of
//! functionality. Its name always has the form `<category>_<operation>`,
//! where the category is one of the closed set in [`Category`].
//!
//! ## Two-layer success
//!
//! [`ExecutionResult::success`](tool::value_objects::ExecutionResult) only
//! reports whether *invocation* (validation + call) worked. Atlassian tools
//! carry their own `success` flag inside `data` for domain failures such as
//! "issue not found".

pub mod tool;

// Re-export commonly used types
pub use tool::{
    catalog::{CategoryModule, ToolEntry},
    entities::{CATEGORY_SEPARATOR, Category, ToolMetadata, ToolName},
    error::{ModuleLoadError, RegistryError},
    schema::{InputSchema, schema_of},
    traits::{SchemaTool, Tool, TypedTool, into_tool},
    value_objects::{ExecutionResult, InputValidationError, InputViolation, ToolFailure},
};
