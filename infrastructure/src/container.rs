//! Lazily built services
//!
//! A category module owns one [`LazyService`] per backing service. The
//! service is built the first time a tool needs it, so a missing
//! `JIRA_URL` only surfaces when a Jira tool actually runs.

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::http::{AtlassianError, Result};

type Factory<S> = Box<dyn Fn() -> Result<S> + Send + Sync>;

/// Service built on first use from a fallible factory.
///
/// A failed build is not cached: the next call runs the factory again.
pub struct LazyService<S> {
    cell: OnceCell<Arc<S>>,
    factory: Factory<S>,
}

impl<S: Send + Sync> LazyService<S> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<S> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Already-built service; the factory is never consulted
    pub fn ready(service: S) -> Self {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(service))),
            factory: Box::new(|| {
                Err(AtlassianError::Configuration(
                    "service factory unavailable".to_string(),
                ))
            }),
        }
    }

    pub async fn get(&self) -> Result<Arc<S>> {
        let service = self
            .cell
            .get_or_try_init(|| async { (self.factory)().map(Arc::new) })
            .await?;
        Ok(Arc::clone(service))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

impl<S> fmt::Debug for LazyService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyService")
            .field("initialized", &self.cell.initialized())
            .finish()
    }
}
