//! Tool handlers for the MCP server.
//!
//! Both tools are thin wrappers around the workflow engine: they parse
//! arguments, run the resolver or planner, and return the result as JSON text.

use std::sync::Arc;

use async_trait::async_trait;
use myt_jira_workflow::{plan_transition, TransitionPlanRequest, TransitionResolver};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::{ToolCallResult, ToolDefinition};
use crate::tools::{McpTool, ToolRegistry};

/// Registry with every workflow tool, rendering commands for `resolver`.
pub fn default_registry(resolver: TransitionResolver) -> ToolRegistry {
    let resolver = Arc::new(resolver);

    ToolRegistry::new()
        .with(Arc::new(GetJiraTransitionsTool::new(resolver.clone())))
        .with(Arc::new(JiraTransitionTool::new(resolver)))
}

fn parse_arguments<T: for<'de> Deserialize<'de> + Default>(
    arguments: Option<Value>,
) -> Result<T, ToolCallResult> {
    match arguments {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ToolCallResult::error(format!("Invalid arguments: {}", e))),
    }
}

// =============================================================================
// get_jira_transitions
// =============================================================================

/// Parameters for get_jira_transitions tool.
#[derive(Debug, Default, Serialize, Deserialize)]
struct GetJiraTransitionsParams {
    #[serde(default)]
    from_status: String,
    #[serde(default)]
    to_status: Option<String>,
}

/// Calculates the transition path between two statuses.
pub struct GetJiraTransitionsTool {
    resolver: Arc<TransitionResolver>,
}

impl GetJiraTransitionsTool {
    pub fn new(resolver: Arc<TransitionResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl McpTool for GetJiraTransitionsTool {
    fn name(&self) -> &'static str {
        "get_jira_transitions"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: "Calculate the transition path between two JIRA statuses. \
                Supports status aliases (dev, qa, done...) and preset shortcuts: \
                start|dev (Open → In Development), review|pr (In Development → Ready For Codereview), \
                qa|test (Ready For Codereview → Ready for Validation), done (In Validation → Resolved). \
                Returns the steps and ready-to-run Atlassian MCP commands."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "from_status": {
                        "type": "string",
                        "description": "Current JIRA status, alias, or preset shortcut (start, dev, review, pr, qa, test, done)"
                    },
                    "to_status": {
                        "type": "string",
                        "description": "Target JIRA status or alias (optional when using a preset shortcut)"
                    }
                },
                "required": ["from_status"]
            }),
        }
    }

    async fn call(&self, arguments: Option<Value>) -> ToolCallResult {
        let params: GetJiraTransitionsParams = match parse_arguments(arguments) {
            Ok(params) => params,
            Err(result) => return result,
        };

        let result = self.resolver.resolve(
            &params.from_status,
            params.to_status.as_deref().unwrap_or_default(),
        );
        tracing::debug!("get_jira_transitions -> {}", result.kind());

        ToolCallResult::json(&result, result.is_error())
    }
}

// =============================================================================
// jira_transition
// =============================================================================

/// Plans moving a ticket to a target state.
pub struct JiraTransitionTool {
    resolver: Arc<TransitionResolver>,
}

impl JiraTransitionTool {
    pub fn new(resolver: Arc<TransitionResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl McpTool for JiraTransitionTool {
    fn name(&self) -> &'static str {
        "jira_transition"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: "Move a JIRA ticket to a target state using Atlassian MCP. \
                With current_status the transition path is calculated directly; \
                without it, returns step-by-step instructions to look the status up first."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "ticket_id": {
                        "type": "string",
                        "description": "JIRA ticket ID (e.g., SI-8748, PROJ-123)"
                    },
                    "target_state": {
                        "type": "string",
                        "description": "Target JIRA status (full name or alias like 'dev', 'qa', 'done')"
                    },
                    "description": {
                        "type": "string",
                        "description": "Optional context for the transition"
                    },
                    "current_status": {
                        "type": "string",
                        "description": "Current JIRA status, if already known"
                    }
                },
                "required": ["ticket_id", "target_state"]
            }),
        }
    }

    async fn call(&self, arguments: Option<Value>) -> ToolCallResult {
        let request: TransitionPlanRequest = match parse_arguments(arguments) {
            Ok(request) => request,
            Err(result) => return result,
        };

        let plan = plan_transition(&request, &self.resolver);
        ToolCallResult::json(&plan, plan.is_error())
    }
}
