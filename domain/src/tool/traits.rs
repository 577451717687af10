//! Tool contract
//!
//! [`Tool`] is the object-safe contract the registry caches and the engine
//! invokes. Concrete tools implement [`TypedTool`] with real input/output
//! types and are adapted by [`SchemaTool`], which derives both schemas from
//! those types and handles the JSON boundary.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::schema::{InputSchema, schema_of};
use super::value_objects::{InputValidationError, InputViolation, ToolFailure};

/// A named, schema-described, asynchronously invocable unit of functionality.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Globally unique `<category>_<operation>` name
    fn name(&self) -> &str;

    /// Human-readable documentation; may be empty
    fn description(&self) -> &str;

    /// Structural description of the accepted input
    fn input_schema(&self) -> &Value;

    /// Structural description of the output returned on success
    fn output_schema(&self) -> &Value;

    /// Check raw input against the input schema, reporting every violation.
    ///
    /// On success returns the input with loosely typed scalars converted to
    /// the declared types; that value is what gets invoked.
    fn validate(&self, input: Value) -> Result<Value, InputValidationError>;

    /// Invoke with the value returned by [`validate`](Self::validate)
    async fn invoke(&self, input: Value) -> Result<Value, ToolFailure>;
}

/// Strongly typed tool definition.
#[async_trait]
pub trait TypedTool: Send + Sync + 'static {
    type Input: DeserializeOwned + JsonSchema + Send + 'static;
    type Output: Serialize + JsonSchema + Send + 'static;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    async fn call(&self, input: Self::Input) -> Result<Self::Output, ToolFailure>;
}

/// Adapts a [`TypedTool`] to the [`Tool`] contract.
///
/// Schemas are generated once, at construction.
pub struct SchemaTool<T: TypedTool> {
    inner: T,
    input_schema: InputSchema,
    output_schema: Value,
}

impl<T: TypedTool> SchemaTool<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            input_schema: InputSchema::for_type::<T::Input>(),
            output_schema: schema_of::<T::Output>(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn decode(&self, input: &Value) -> Result<T::Input, InputValidationError> {
        T::Input::deserialize(input).map_err(|e| {
            InputValidationError::new(self.inner.name(), vec![InputViolation::new("input", e.to_string())])
        })
    }
}

/// Wrap a typed tool as a shared `dyn Tool`
pub fn into_tool<T: TypedTool>(tool: T) -> Arc<dyn Tool> {
    Arc::new(SchemaTool::new(tool))
}

#[async_trait]
impl<T: TypedTool> Tool for SchemaTool<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn input_schema(&self) -> &Value {
        self.input_schema.document()
    }

    fn output_schema(&self) -> &Value {
        &self.output_schema
    }

    fn validate(&self, input: Value) -> Result<Value, InputValidationError> {
        let input = self.input_schema.coerce(input);
        let violations = self.input_schema.violations(&input);
        if !violations.is_empty() {
            return Err(InputValidationError::new(self.inner.name(), violations));
        }
        // Schema and serde agree for derived types; this catches the rest
        self.decode(&input)?;
        Ok(input)
    }

    async fn invoke(&self, input: Value) -> Result<Value, ToolFailure> {
        let typed = self.decode(&input).map_err(|e| ToolFailure::from_error(&e))?;
        let output = self.inner.call(typed).await?;
        serde_json::to_value(output).map_err(|e| ToolFailure::from_error(&e))
    }
}
