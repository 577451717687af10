//! Category module resolver port
//!
//! Resolving a category is the Rust counterpart of importing the module that
//! defines it. The registry calls this at most once per category until its
//! cache is cleared.

use std::sync::Arc;

use atlassian_domain::tool::{Category, CategoryModule, ModuleLoadError};

/// Port for locating the module that defines a category's tools
///
/// Implementations (adapters) live in the infrastructure layer.
pub trait CategoryModuleResolver: Send + Sync {
    /// Resolve the defining module of `category`.
    ///
    /// A category that is not present in this deployment fails with
    /// [`ModuleLoadError`]; discovery treats that as an empty category.
    fn resolve(&self, category: Category) -> Result<Arc<dyn CategoryModule>, ModuleLoadError>;
}
