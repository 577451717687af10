//! Category module contract
//!
//! A category module is the unit of lazy loading: it owns one category's
//! tools and declares them as a static export list. Nothing is constructed
//! until the registry asks an entry to [`build`](ToolEntry::build).

use std::fmt;
use std::sync::Arc;

use super::entities::Category;
use super::traits::Tool;

type ToolFactory = Arc<dyn Fn() -> Arc<dyn Tool> + Send + Sync>;

/// A declared export: a tool name and the factory that constructs it.
#[derive(Clone)]
pub struct ToolEntry {
    name: &'static str,
    factory: ToolFactory,
}

impl ToolEntry {
    pub fn new<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Tool> + Send + Sync + 'static,
    {
        Self {
            name,
            factory: Arc::new(factory),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn build(&self) -> Arc<dyn Tool> {
        (self.factory)()
    }
}

impl fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEntry").field("name", &self.name).finish()
    }
}

/// The set of tools belonging to one category.
pub trait CategoryModule: Send + Sync {
    fn category(&self) -> Category;

    /// Every tool this module provides. Names must carry the module's
    /// category prefix; entries that do not are never discovered.
    fn exports(&self) -> &[ToolEntry];
}
