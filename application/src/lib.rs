//! Application layer for atlassian-tools
//!
//! This crate contains the tool registry, the execution use case and the
//! port through which category modules are resolved.
//! It depends only on the domain layer.

pub mod catalog;
pub mod ports;
pub mod registry;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use catalog::{get_tool_info, list_tools, search_tools};
pub use ports::module_resolver::CategoryModuleResolver;
pub use registry::{ToolRegistry, extract_metadata};
pub use use_cases::execute_tool::ExecuteToolUseCase;
