//! Tool domain value objects — envelope, validation and failure types
//!
//! [`ExecutionResult`] is what every execution attempt returns. Its
//! constructors enforce exclusivity: a success never carries an error and a
//! failure never carries data.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The uniform `{success, data, error, tool_name}` envelope.
///
/// Absent `data`/`error` serialize as `null` so the JSON shape is stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    success: bool,
    data: Option<Value>,
    error: Option<String>,
    tool_name: String,
}

impl ExecutionResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            tool_name: tool_name.into(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            tool_name: tool_name.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }
}

/// One violated constraint in a tool input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputViolation {
    /// Dotted path of the offending field, or `input` for the root
    pub path: String,
    pub message: String,
}

impl InputViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for InputViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Raw input failed structural validation; carries every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct InputValidationError {
    pub tool_name: String,
    pub violations: Vec<InputViolation>,
}

impl InputValidationError {
    pub fn new(tool_name: impl Into<String>, violations: Vec<InputViolation>) -> Self {
        Self {
            tool_name: tool_name.into(),
            violations,
        }
    }

    pub fn violations(&self) -> &[InputViolation] {
        &self.violations
    }
}

impl fmt::Display for InputValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        let plural = if count == 1 { "" } else { "s" };
        write!(f, "{count} validation error{plural} for {}", self.tool_name)?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

/// A tool invocation failed in a way the tool itself did not turn into a
/// domain result.
///
/// `kind` names the failure class (the error type, or `Panic`), `message`
/// is its display text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ToolFailure {
    pub kind: String,
    pub message: String,
}

impl ToolFailure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Wrap any error, using its unqualified type name as the kind
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self::new(short_type_name::<E>(), error.to_string())
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
