//! MCP tool trait and registry.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::protocol::{ToolCallResult, ToolDefinition};

/// A tool the server can list and call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name as used in `tools/call`
    fn name(&self) -> &'static str;

    /// Definition returned by `tools/list`
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool. Failures are reported in the result, never panicked.
    async fn call(&self, arguments: Option<Value>) -> ToolCallResult;
}

/// Registered tools, in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn McpTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name is replaced in place.
    pub fn register(&mut self, tool: Arc<dyn McpTool>) {
        let name = tool.name();

        if let Some(existing) = self.tools.iter_mut().find(|t| t.name() == name) {
            tracing::warn!("Tool '{}' registered twice, replacing", name);
            *existing = tool;
            return;
        }

        tracing::debug!("Registered tool: {}", name);
        self.tools.push(tool);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, tool: Arc<dyn McpTool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions of all tools for `tools/list`.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Call a tool by name.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        match self.get(name) {
            Some(tool) => tool.call(arguments).await,
            None => ToolCallResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn mock_tool(name: &'static str) -> MockMcpTool {
        let mut tool = MockMcpTool::new();
        tool.expect_name().return_const(name);
        tool.expect_definition().returning(move || ToolDefinition {
            name: name.to_string(),
            description: format!("{} tool", name),
            input_schema: serde_json::json!({"type": "object"}),
        });
        tool
    }

    #[tokio::test]
    async fn test_call_dispatches_by_name() {
        let mut echo = mock_tool("echo");
        echo.expect_call()
            .with(eq(Some(serde_json::json!({"text": "hi"}))))
            .times(1)
            .returning(|_| ToolCallResult::text("hi".to_string()));

        let registry = ToolRegistry::new().with(Arc::new(echo));
        let result = registry
            .call("echo", Some(serde_json::json!({"text": "hi"})))
            .await;

        assert!(result.is_error.is_none());
        assert_eq!(result.text_content(), "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let result = registry.call("nope", None).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.text_content(), "Unknown tool: nope");
    }

    #[test]
    fn test_registration_order_and_replacement() {
        let mut registry = ToolRegistry::new()
            .with(Arc::new(mock_tool("first")))
            .with(Arc::new(mock_tool("second")));

        registry.register(Arc::new(mock_tool("first")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["first", "second"]);

        let definitions = registry.definitions();
        assert_eq!(definitions[1].name, "second");
        assert_eq!(definitions[0].description, "first tool");
    }
}
