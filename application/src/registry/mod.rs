//! Tool Registry
//!
//! The [`ToolRegistry`] maps categories to tool names, tool names to loaded
//! tools, and tool names to metadata, deferring the cost of building a tool
//! until it is actually needed.
//!
//! # Usage
//!
//! ```ignore
//! use atlassian_application::ToolRegistry;
//!
//! let resolver = AtlassianModuleResolver::from_settings(&settings);
//! let registry = ToolRegistry::new(Arc::new(resolver));
//!
//! // Cheap: reads export lists only
//! let names = registry.discover(Some(Category::Jira));
//!
//! // Builds and caches one tool
//! let tool = registry.load("jira_get_issue")?;
//! ```
//!
//! # Per-name lifecycle
//!
//! `Unknown → Discovered → Loaded → MetadataComputed`. [`clear_cache`]
//! drops every cached tool, metadata snapshot and resolved module, which
//! sends each name back to `Unknown` until the next discovery.
//!
//! Caches are only ever written with insert-if-absent, so concurrent loads
//! of the same name may build it twice but always agree on one cached value.
//!
//! [`clear_cache`]: ToolRegistry::clear_cache

mod metadata;

pub use metadata::extract_metadata;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use atlassian_domain::tool::{
    Category, CategoryModule, ModuleLoadError, RegistryError, Tool, ToolMetadata, ToolName,
};

use crate::ports::module_resolver::CategoryModuleResolver;

/// Lazy-loading registry of tools across all categories
pub struct ToolRegistry {
    resolver: Arc<dyn CategoryModuleResolver>,
    /// Modules resolved so far ("seen" modules)
    modules: RwLock<HashMap<Category, Arc<dyn CategoryModule>>>,
    /// Tool name -> loaded tool
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
    /// Tool name -> metadata snapshot
    metadata: RwLock<HashMap<String, ToolMetadata>>,
}

impl ToolRegistry {
    pub fn new(resolver: Arc<dyn CategoryModuleResolver>) -> Self {
        Self {
            resolver,
            modules: RwLock::new(HashMap::new()),
            tools: RwLock::new(HashMap::new()),
            metadata: RwLock::new(HashMap::new()),
        }
    }

    /// List tool names, sorted, for one category or for all of them.
    ///
    /// Only export lists are read; no tool is built. A category whose module
    /// cannot be resolved contributes nothing.
    pub fn discover(&self, category: Option<Category>) -> Vec<String> {
        let categories = match category {
            Some(category) => vec![category],
            None => Category::ALL.to_vec(),
        };

        let mut names = Vec::new();
        for category in categories {
            match self.module(category) {
                Ok(module) => names.extend(
                    module
                        .exports()
                        .iter()
                        .map(|entry| entry.name())
                        .filter(|name| belongs_to(name, category))
                        .map(str::to_string),
                ),
                Err(e) => {
                    tracing::warn!(%category, error = %e, "Category unavailable, skipping");
                }
            }
        }

        names.sort();
        names.dedup();
        names
    }

    /// Resolve a tool name to its loaded tool, building it on first use.
    pub fn load(&self, name: &str) -> Result<Arc<dyn Tool>, RegistryError> {
        if let Some(tool) = read(&self.tools).get(name) {
            tracing::trace!(tool = name, "Tool cache hit");
            return Ok(Arc::clone(tool));
        }

        let parsed = ToolName::parse(name)?;
        let module = self.module(parsed.category())?;

        let entry = module
            .exports()
            .iter()
            .find(|entry| entry.name() == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        tracing::debug!(tool = name, category = %parsed.category(), "Loading tool");
        let tool = entry.build();

        let mut tools = write(&self.tools);
        let cached = tools.entry(name.to_string()).or_insert(tool);
        Ok(Arc::clone(cached))
    }

    /// Discovery metadata for a tool, loading the tool if necessary.
    pub fn get_metadata(&self, name: &str) -> Result<ToolMetadata, RegistryError> {
        if let Some(metadata) = read(&self.metadata).get(name) {
            return Ok(metadata.clone());
        }

        let tool = self.load(name)?;
        let category = ToolName::parse(name)?.category();
        let metadata = extract_metadata(tool.as_ref(), category)?;

        let mut cache = write(&self.metadata);
        Ok(cache.entry(name.to_string()).or_insert(metadata).clone())
    }

    /// Case-insensitive search over tool names, then descriptions.
    ///
    /// A name match never loads the tool. Tools that fail to load while
    /// their description is being checked are left out of the result.
    pub fn search(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();

        self.discover(None)
            .into_iter()
            .filter(|name| {
                if name.to_lowercase().contains(&needle) {
                    return true;
                }
                match self.get_metadata(name) {
                    Ok(metadata) => metadata.description.to_lowercase().contains(&needle),
                    Err(e) => {
                        tracing::warn!(tool = %name, error = %e, "Skipping tool in search");
                        false
                    }
                }
            })
            .collect()
    }

    /// Names currently in the loaded-tool cache, sorted
    pub fn loaded_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.tools).keys().cloned().collect();
        names.sort();
        names
    }

    /// Categories whose modules have been resolved, sorted by name
    pub fn loaded_modules(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = read(&self.modules).keys().map(Category::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drop all loaded tools, metadata and resolved modules.
    pub fn clear_cache(&self) {
        write(&self.tools).clear();
        write(&self.metadata).clear();
        write(&self.modules).clear();
        tracing::debug!("Tool registry cache cleared");
    }

    fn module(&self, category: Category) -> Result<Arc<dyn CategoryModule>, ModuleLoadError> {
        if let Some(module) = read(&self.modules).get(&category) {
            return Ok(Arc::clone(module));
        }

        tracing::debug!(%category, "Resolving category module");
        let module = self.resolver.resolve(category)?;

        let mut modules = write(&self.modules);
        Ok(Arc::clone(modules.entry(category).or_insert(module)))
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("loaded_modules", &self.loaded_modules())
            .field("loaded_tools", &self.loaded_names())
            .finish()
    }
}

fn belongs_to(name: &str, category: Category) -> bool {
    ToolName::parse(name).is_ok_and(|parsed| parsed.category() == category)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
