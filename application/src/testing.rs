//! In-memory category modules and tools for registry and engine tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atlassian_domain::tool::{
    Category, CategoryModule, InputValidationError, ModuleLoadError, Tool, ToolEntry, ToolFailure,
    TypedTool, into_tool,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolRegistry;
use crate::ports::module_resolver::CategoryModuleResolver;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoIssueInput {
    #[schemars(length(min = 1))]
    pub issue_key: String,
    #[serde(default = "default_comment_limit")]
    #[schemars(range(min = 0, max = 100))]
    pub comment_limit: i64,
}

fn default_comment_limit() -> i64 {
    10
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct EchoIssueOutput {
    pub success: bool,
    pub issue_key: String,
    pub comment_limit: i64,
    pub error: Option<String>,
}

/// Echoes its input; `MISSING-1` reports a domain-level not-found
pub struct EchoIssueTool;

#[async_trait]
impl TypedTool for EchoIssueTool {
    type Input = EchoIssueInput;
    type Output = EchoIssueOutput;

    fn name(&self) -> &'static str {
        "jira_echo_issue"
    }

    fn description(&self) -> &'static str {
        "Fetch one issue by key."
    }

    async fn call(&self, input: EchoIssueInput) -> Result<EchoIssueOutput, ToolFailure> {
        let error = (input.issue_key == "MISSING-1").then(|| format!("Issue {} not found", input.issue_key));
        Ok(EchoIssueOutput {
            success: error.is_none(),
            issue_key: input.issue_key,
            comment_limit: input.comment_limit,
            error,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoPageInput {
    #[schemars(length(min = 1))]
    pub page_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct EchoPageOutput {
    pub page_id: String,
}

pub struct EchoPageTool;

#[async_trait]
impl TypedTool for EchoPageTool {
    type Input = EchoPageInput;
    type Output = EchoPageOutput;

    fn name(&self) -> &'static str {
        "confluence_echo_page"
    }

    fn description(&self) -> &'static str {
        "Fetch one page by id."
    }

    async fn call(&self, input: EchoPageInput) -> Result<EchoPageOutput, ToolFailure> {
        Ok(EchoPageOutput {
            page_id: input.page_id,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoInput {}

pub struct FailTool;

#[async_trait]
impl TypedTool for FailTool {
    type Input = NoInput;
    type Output = Value;

    fn name(&self) -> &'static str {
        "jira_fail"
    }

    fn description(&self) -> &'static str {
        "Always fails."
    }

    async fn call(&self, _input: NoInput) -> Result<Value, ToolFailure> {
        Err(ToolFailure::new("ServiceError", "upstream unavailable"))
    }
}

pub struct ExplodeTool;

#[async_trait]
impl TypedTool for ExplodeTool {
    type Input = NoInput;
    type Output = Value;

    fn name(&self) -> &'static str {
        "jira_explode"
    }

    fn description(&self) -> &'static str {
        "Panics when called."
    }

    async fn call(&self, _input: NoInput) -> Result<Value, ToolFailure> {
        panic!("tool exploded")
    }
}

/// Hand-written tool whose schemas can be made malformed
pub struct BrokenTool {
    name: String,
    schema: Value,
}

impl BrokenTool {
    pub fn with_schemas(name: &str, schema: Value) -> Self {
        Self {
            name: name.to_string(),
            schema,
        }
    }
}

#[async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        ""
    }

    fn input_schema(&self) -> &Value {
        &self.schema
    }

    fn output_schema(&self) -> &Value {
        &self.schema
    }

    fn validate(&self, input: Value) -> Result<Value, InputValidationError> {
        Ok(input)
    }

    async fn invoke(&self, _input: Value) -> Result<Value, ToolFailure> {
        Ok(Value::Null)
    }
}

pub struct FakeModule {
    category: Category,
    exports: Vec<ToolEntry>,
}

impl CategoryModule for FakeModule {
    fn category(&self) -> Category {
        self.category
    }

    fn exports(&self) -> &[ToolEntry] {
        &self.exports
    }
}

/// Resolver that counts module resolutions and tool builds
pub struct CountingResolver {
    modules: HashMap<Category, Arc<FakeModule>>,
    resolutions: Mutex<HashMap<Category, usize>>,
    builds: Arc<AtomicUsize>,
}

impl CountingResolver {
    pub fn new() -> Self {
        let builds = Arc::new(AtomicUsize::new(0));
        let jira = FakeModule {
            category: Category::Jira,
            exports: vec![
                counted("jira_echo_issue", &builds, || into_tool(EchoIssueTool)),
                counted("jira_fail", &builds, || into_tool(FailTool)),
                counted("jira_explode", &builds, || into_tool(ExplodeTool)),
                counted("jira_broken", &builds, || {
                    Arc::new(BrokenTool::with_schemas("jira_broken", Value::Null))
                }),
                counted("confluence_stray", &builds, || into_tool(EchoPageTool)),
            ],
        };
        let confluence = FakeModule {
            category: Category::Confluence,
            exports: vec![counted("confluence_echo_page", &builds, || into_tool(EchoPageTool))],
        };

        Self {
            modules: HashMap::from([
                (Category::Jira, Arc::new(jira)),
                (Category::Confluence, Arc::new(confluence)),
            ]),
            resolutions: Mutex::new(HashMap::new()),
            builds,
        }
    }

    pub fn jira_only() -> Self {
        let mut resolver = Self::new();
        resolver.modules.remove(&Category::Confluence);
        resolver
    }

    pub fn resolutions(&self, category: Category) -> usize {
        self.resolutions.lock().unwrap().get(&category).copied().unwrap_or(0)
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl CategoryModuleResolver for CountingResolver {
    fn resolve(&self, category: Category) -> Result<Arc<dyn CategoryModule>, ModuleLoadError> {
        *self.resolutions.lock().unwrap().entry(category).or_insert(0) += 1;
        match self.modules.get(&category) {
            Some(module) => Ok(Arc::clone(module) as Arc<dyn CategoryModule>),
            None => Err(ModuleLoadError::new(category, "module not deployed")),
        }
    }
}

fn counted<F>(name: &'static str, builds: &Arc<AtomicUsize>, make: F) -> ToolEntry
where
    F: Fn() -> Arc<dyn Tool> + Send + Sync + 'static,
{
    let builds = Arc::clone(builds);
    ToolEntry::new(name, move || {
        builds.fetch_add(1, Ordering::SeqCst);
        make()
    })
}

/// Fresh registry over both fake modules
pub fn fake_registry() -> (ToolRegistry, Arc<CountingResolver>) {
    let resolver = Arc::new(CountingResolver::new());
    let registry = ToolRegistry::new(resolver.clone());
    (registry, resolver)
}
