//! Execute Tool use case.
//!
//! Turns a `(tool name, raw JSON input)` pair into an [`ExecutionResult`].
//! Nothing escapes this use case: registry errors, validation errors, tool
//! failures and panics are all flattened into the envelope's `error` string.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Instant;

use atlassian_domain::tool::{ExecutionResult, InputValidationError, RegistryError, Tool, ToolFailure};
use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::registry::ToolRegistry;

/// Why a tool could not be made ready for invocation.
enum Rejection {
    Registry(RegistryError),
    Validation(InputValidationError),
    /// Resolution or validation panicked
    Unexpected(ToolFailure),
}

/// Use case for executing tools by name.
///
/// Holds no state of its own beyond the shared registry.
#[derive(Debug, Clone)]
pub struct ExecuteToolUseCase {
    registry: Arc<ToolRegistry>,
}

impl ExecuteToolUseCase {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Load, validate and invoke a tool. Always returns an envelope.
    ///
    /// Load failures are reported before validation failures, and
    /// validation failures before invocation.
    pub async fn execute(&self, name: &str, input: Value) -> ExecutionResult {
        let started = Instant::now();
        info!(tool = name, "Executing tool");

        let result = match self.prepare(name, input) {
            Ok((tool, input)) => invoke(tool.as_ref(), name, input).await,
            Err(Rejection::Registry(e)) => ExecutionResult::failure(name, format!("Tool error: {e}")),
            Err(Rejection::Validation(e)) => {
                ExecutionResult::failure(name, format!("Input validation error: {e}"))
            }
            Err(Rejection::Unexpected(failure)) => {
                ExecutionResult::failure(name, format!("Execution error: {failure}"))
            }
        };

        info!(
            tool = name,
            success = result.is_success(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Tool execution finished"
        );
        result
    }

    /// Resolve and validate without invoking.
    ///
    /// Returns `(true, None)` when the input would be accepted.
    pub fn validate_only(&self, name: &str, input: &Value) -> (bool, Option<String>) {
        match self.prepare(name, input.clone()) {
            Ok(_) => (true, None),
            Err(Rejection::Registry(e)) => (false, Some(format!("Tool error: {e}"))),
            Err(Rejection::Validation(e)) => (false, Some(format!("Input validation error: {e}"))),
            Err(Rejection::Unexpected(failure)) => (false, Some(format!("Unexpected error: {failure}"))),
        }
    }

    /// Load the tool and validate `input`, returning the value to invoke it with
    fn prepare(&self, name: &str, input: Value) -> Result<(Arc<dyn Tool>, Value), Rejection> {
        let outcome = catch_unwind(AssertUnwindSafe(move || -> Result<_, Rejection> {
            let tool = self.registry.load(name).map_err(Rejection::Registry)?;
            let input = tool.validate(input).map_err(Rejection::Validation)?;
            Ok((tool, input))
        }));

        outcome.unwrap_or_else(|panic| Err(Rejection::Unexpected(panic_failure(panic.as_ref()))))
    }
}

async fn invoke(tool: &dyn Tool, name: &str, input: Value) -> ExecutionResult {
    match AssertUnwindSafe(tool.invoke(input)).catch_unwind().await {
        Ok(Ok(data)) => {
            debug!(tool = name, "Tool returned");
            ExecutionResult::success(name, data)
        }
        Ok(Err(failure)) => {
            warn!(tool = name, error = %failure, "Tool invocation failed");
            ExecutionResult::failure(name, format!("Execution error: {failure}"))
        }
        Err(panic) => {
            let failure = panic_failure(panic.as_ref());
            warn!(tool = name, error = %failure, "Tool panicked");
            ExecutionResult::failure(name, format!("Execution error: {failure}"))
        }
    }
}

fn panic_failure(payload: &(dyn Any + Send)) -> ToolFailure {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "tool panicked".to_string());
    ToolFailure::new("Panic", message)
}
