//! Tool registry and execution
//!
//! The registry is the tool-call boundary. The conversational layer driving
//! it has no structured error channel, so `execute` never returns a Rust
//! error: unknown tools, validation failures, execution errors, and
//! timeouts all terminate in a [`ToolOutput`], flagged as an error where
//! appropriate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::mcp::{Tool, ToolError, ToolOutput, ToolSchema};

/// Registry of callable tools, keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name, replacing any previous holder
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Schemas of every registered tool, sorted by name, for advertising to
    /// a language model
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute a tool by name.
    ///
    /// Validates the input against the tool's schema, then runs the tool
    /// under its own timeout. Every failure path degrades to an error
    /// output; nothing propagates past this boundary.
    pub async fn execute(&self, name: &str, input: Value) -> ToolOutput {
        let tool = match self.get(name) {
            Some(tool) => tool,
            None => {
                tracing::warn!(tool = name, "Unknown tool requested");
                return error_output(ToolError::not_found(format!("Unknown tool: {}", name)));
            }
        };

        if let Err(e) = tool.validate(&input) {
            tracing::warn!(tool = name, error = %e, "Tool input rejected");
            return error_output(e);
        }

        let timeout = Duration::from_secs(tool.timeout_secs());
        match tokio::time::timeout(timeout, tool.execute(input)).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::error!(tool = name, error = %e, "Tool execution failed");
                error_output(e)
            }
            Err(_) => {
                tracing::error!(tool = name, timeout_secs = tool.timeout_secs(), "Tool timed out");
                error_output(ToolError::timeout(name, tool.timeout_secs()))
            }
        }
    }
}

fn error_output(error: ToolError) -> ToolOutput {
    ToolOutput::error(error.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::{InputSchema, PropertySchema};
    use async_trait::async_trait;
    use serde_json::json;

    struct SlowTool;

    #[async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }

        fn description(&self) -> &str {
            "Sleeps past its own timeout"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object(),
            }
        }

        async fn execute(&self, _input: Value) -> Result<ToolOutput, ToolError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(ToolOutput::text("done"))
        }

        fn timeout_secs(&self) -> u64 {
            1
        }
    }

    struct GreetTool;

    #[async_trait]
    impl Tool for GreetTool {
        fn name(&self) -> &str {
            "greet"
        }

        fn description(&self) -> &str {
            "Greets a person"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object().property(
                    "who",
                    PropertySchema::string("Person to greet"),
                    true,
                ),
            }
        }

        async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
            let who = input.get("who").and_then(|v| v.as_str()).unwrap_or("?");
            Ok(ToolOutput::text(format!("Hello, {}!", who)))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(GreetTool));
        registry.register(Arc::new(SlowTool));
        registry
    }

    #[tokio::test]
    async fn test_execute_known_tool() {
        let output = registry().execute("greet", json!({"who": "Asha"})).await;
        assert!(!output.is_error);
        assert_eq!(output.text_content(), "Hello, Asha!");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_output() {
        let output = registry().execute("missing", json!({})).await;
        assert!(output.is_error);
        assert!(output.text_content().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_validation_failure_is_error_output() {
        let output = registry().execute("greet", json!({})).await;
        assert!(output.is_error);
        assert!(output.text_content().contains("who"));
    }

    #[tokio::test]
    async fn test_timeout_is_error_output() {
        let output = registry().execute("slow", json!({})).await;
        assert!(output.is_error);
        assert!(output.text_content().contains("timed out"));
    }

    #[test]
    fn test_schemas_sorted_by_name() {
        let schemas = registry().schemas();
        let names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["greet", "slow"]);
    }
}
