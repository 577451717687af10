//! Tool domain module
//!
//! Defines what a tool *is* for the rest of the system, without saying
//! how tools are found, loaded or executed.
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌─────────────────┐
//! │ CategoryModule │───▶│ ToolEntry    │───▶│ dyn Tool        │
//! │ (exports)      │    │ (name+build) │    │ (schemas+invoke)│
//! └────────────────┘    └──────────────┘    └────────┬────────┘
//!                                                  │
//!                                                  ▼
//!                                         ┌─────────────────┐
//!                                         │ ExecutionResult │
//!                                         └─────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Tool`] — Object-safe contract used by the registry and engine
//! - [`TypedTool`] — Strongly typed contract implemented by concrete tools;
//!   adapted to [`Tool`] by [`SchemaTool`]
//! - [`InputSchema`] — One schema declaration used both for validation and
//!   for discovery metadata
//! - [`ToolName`] / [`Category`] — Parsed `<category>_<operation>` identity
//! - [`ExecutionResult`] — The uniform envelope
//! - [`RegistryError`] — Name, category, module and lookup failures

pub mod catalog;
pub mod entities;
pub mod error;
pub mod schema;
pub mod traits;
pub mod value_objects;

pub use catalog::{CategoryModule, ToolEntry};
pub use entities::{CATEGORY_SEPARATOR, Category, ToolMetadata, ToolName};
pub use error::{ModuleLoadError, RegistryError};
pub use schema::{InputSchema, schema_of};
pub use traits::{SchemaTool, Tool, TypedTool, into_tool};
pub use value_objects::{ExecutionResult, InputValidationError, InputViolation, ToolFailure};
