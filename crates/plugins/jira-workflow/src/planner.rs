//! Ticket-level transition plans.
//!
//! Where the resolver works on bare statuses, a plan is about one ticket: it
//! either computes the path right away (current status known) or tells the
//! agent how to look the status up first and come back for the path.

use myt_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aliases::{resolve_alias, STATUS_ALIASES};
use crate::command::{
    fill_ticket, get_issue_command, get_transitions_command, transition_by_id_command,
};
use crate::resolver::TransitionResolver;
use crate::result::TransitionResult;

const DEFAULT_DESCRIPTION: &str = "Automated JIRA transition via MCP Tools";

/// Arguments of the `jira_transition` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionPlanRequest {
    /// Ticket key, e.g. `SI-8748`
    #[serde(default)]
    pub ticket_id: String,
    /// Target status or alias
    #[serde(default)]
    pub target_state: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Current status, when the caller already knows it
    #[serde(default)]
    pub current_status: Option<String>,
}

/// Aliases of one canonical status, as listed to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusAliases {
    pub status: &'static str,
    pub aliases: &'static [&'static str],
}

/// What the agent should do to move a ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionPlan {
    /// Current status unknown: fetch it, calculate, execute, verify.
    InstructionOrchestration {
        tool: &'static str,
        method: &'static str,
        ticket_id: String,
        target_state: String,
        resolved_target: String,
        cloud_id: String,
        instructions: String,
        mcp_commands: Vec<String>,
        description: String,
        status_aliases: Vec<StatusAliases>,
    },

    /// Current status known: the path is already worked out.
    CalculatedTransition {
        ticket_id: String,
        current_status: String,
        target_status: String,
        description: String,
        /// Commands with the ticket id filled in
        commands: Vec<String>,
        resolution: TransitionResult,
    },

    Error {
        message: String,
        error: String,
        error_type: String,
        ticket_id: String,
        target_state: String,
        suggestion: String,
    },
}

impl TransitionPlan {
    pub fn is_error(&self) -> bool {
        match self {
            Self::Error { .. } => true,
            Self::CalculatedTransition { resolution, .. } => resolution.is_error(),
            Self::InstructionOrchestration { .. } => false,
        }
    }
}

/// Build a plan for moving `request.ticket_id` to `request.target_state`.
pub fn plan_transition(
    request: &TransitionPlanRequest,
    resolver: &TransitionResolver,
) -> TransitionPlan {
    info!(
        ticket_id = %request.ticket_id,
        target_state = %request.target_state,
        "Planning JIRA transition"
    );

    try_plan(request, resolver).unwrap_or_else(|err| {
        warn!(error = %err, "JIRA transition planning failed");
        TransitionPlan::Error {
            message: format!("JIRA transition planning failed: {}", err),
            error: err.to_string(),
            error_type: err.type_name().to_string(),
            ticket_id: request.ticket_id.trim().to_string(),
            target_state: request.target_state.trim().to_string(),
            suggestion: "Check ticket ID format (e.g., SI-8748) and target state".to_string(),
        }
    })
}

fn try_plan(
    request: &TransitionPlanRequest,
    resolver: &TransitionResolver,
) -> Result<TransitionPlan> {
    let ticket_id = request.ticket_id.trim();
    let target_state = request.target_state.trim();

    if ticket_id.is_empty() {
        return Err(Error::Validation("Ticket ID cannot be empty".to_string()));
    }
    if target_state.is_empty() {
        return Err(Error::Validation("Target state cannot be empty".to_string()));
    }

    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();
    let resolved_target = resolve_alias(target_state);

    if let Some(current_status) = request
        .current_status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let resolution = resolver.resolve_statuses(current_status, &resolved_target);
        let commands = resolution
            .commands()
            .into_iter()
            .map(|cmd| fill_ticket(cmd, ticket_id))
            .collect();

        return Ok(TransitionPlan::CalculatedTransition {
            ticket_id: ticket_id.to_string(),
            current_status: current_status.to_string(),
            target_status: resolved_target,
            description,
            commands,
            resolution,
        });
    }

    let cloud_id = resolver.cloud_id();
    Ok(TransitionPlan::InstructionOrchestration {
        tool: "jira_transition",
        method: "atlassian_mcp",
        ticket_id: ticket_id.to_string(),
        target_state: target_state.to_string(),
        instructions: render_instructions(
            ticket_id,
            target_state,
            &resolved_target,
            cloud_id,
            &description,
        ),
        resolved_target,
        cloud_id: cloud_id.to_string(),
        mcp_commands: vec![
            get_issue_command(cloud_id, ticket_id, &["status", "summary"]),
            get_transitions_command(cloud_id, ticket_id),
            transition_by_id_command(cloud_id, ticket_id),
            get_issue_command(cloud_id, ticket_id, &["status"]),
        ],
        description,
        status_aliases: STATUS_ALIASES
            .iter()
            .map(|&(status, aliases)| StatusAliases { status, aliases })
            .collect(),
    })
}

fn render_instructions(
    ticket_id: &str,
    target_state: &str,
    resolved_target: &str,
    cloud_id: &str,
    description: &str,
) -> String {
    format!(
        "# JIRA Transition Instructions for {ticket} → {target}\n\
         \n\
         ## Step 1: Get Current Status\n\
         ```\n{get_status}\n```\n\
         \n\
         ## Step 2: Calculate Transition Path\n\
         Call `get_jira_transitions(from_status=\"[CURRENT_STATUS_FROM_STEP_1]\", to_status=\"{resolved}\")`.\n\
         It returns `no_transition_needed`, `direct_transition`, `multi_step_transition` \
         or `no_transition_path` with the next steps that are available.\n\
         \n\
         ## Step 3: Execute Transitions\n\
         Run each returned `atlassian_command(s)` in order, replacing `[TICKET_ID]` with `{ticket}`.\n\
         \n\
         ## Step 4: Verify Final Status\n\
         ```\n{verify}\n```\n\
         \n\
         **Input**: '{target}' → **Resolved**: '{resolved}'\n\
         \n\
         **Description**: {description}\n",
        ticket = ticket_id,
        target = target_state,
        resolved = resolved_target,
        get_status = get_issue_command(cloud_id, ticket_id, &["status", "summary", "assignee"]),
        verify = get_issue_command(cloud_id, ticket_id, &["status"]),
        description = description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ticket: &str, target: &str, current: Option<&str>) -> TransitionPlanRequest {
        TransitionPlanRequest {
            ticket_id: ticket.to_string(),
            target_state: target.to_string(),
            description: None,
            current_status: current.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_ticket_is_error() {
        let plan = plan_transition(&request("  ", "dev", None), &TransitionResolver::default());

        match plan {
            TransitionPlan::Error {
                error, error_type, ..
            } => {
                assert_eq!(error, "Ticket ID cannot be empty");
                assert_eq!(error_type, "ValidationError");
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_target_is_error() {
        let plan = plan_transition(&request("SI-1", "", None), &TransitionResolver::default());
        assert!(plan.is_error());
    }

    #[test]
    fn test_orchestration_without_current_status() {
        let resolver = TransitionResolver::new("acme.atlassian.net");
        let plan = plan_transition(&request(" SI-8748 ", "qa", None), &resolver);

        match plan {
            TransitionPlan::InstructionOrchestration {
                ticket_id,
                resolved_target,
                mcp_commands,
                instructions,
                description,
                status_aliases,
                ..
            } => {
                assert_eq!(ticket_id, "SI-8748");
                assert_eq!(resolved_target, "Ready for Validation");
                assert_eq!(mcp_commands.len(), 4);
                assert!(mcp_commands.iter().all(|c| c.contains("SI-8748")));
                assert!(mcp_commands[2].contains("TRANSITION_ID"));
                assert!(instructions.contains("to_status=\"Ready for Validation\""));
                assert!(instructions.contains("cloudId=\"acme.atlassian.net\""));
                assert_eq!(description, DEFAULT_DESCRIPTION);
                assert_eq!(status_aliases.len(), STATUS_ALIASES.len());
            }
            other => panic!("expected orchestration, got {:?}", other),
        }
    }

    #[test]
    fn test_calculated_with_current_status() {
        let mut req = request("PROJ-123", "dev", Some("Open"));
        req.description = Some("Picking this up".to_string());
        let plan = plan_transition(&req, &TransitionResolver::default());

        match plan {
            TransitionPlan::CalculatedTransition {
                target_status,
                commands,
                resolution,
                description,
                ..
            } => {
                assert_eq!(target_status, "In Development");
                assert_eq!(resolution.kind(), "multi_step_transition");
                assert_eq!(commands.len(), 3);
                assert!(commands
                    .iter()
                    .all(|c| c.contains(r#"issueIdOrKey="PROJ-123""#)));
                assert_eq!(description, "Picking this up");
            }
            other => panic!("expected calculated transition, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_current_status_is_a_status() {
        // "qa" names Ready for Validation here, not the qa preset
        let plan = plan_transition(
            &request("PROJ-9", "done", Some("qa")),
            &TransitionResolver::default(),
        );

        match plan {
            TransitionPlan::CalculatedTransition {
                target_status,
                commands,
                resolution,
                ..
            } => {
                assert_eq!(target_status, "Resolved");
                assert_eq!(resolution.kind(), "multi_step_transition");
                let names: Vec<&str> = resolution
                    .transitions()
                    .iter()
                    .map(|s| s.transition_name.as_str())
                    .collect();
                assert_eq!(names, vec!["Start Validation", "Resolve Issue"]);
                assert_eq!(commands.len(), 2);
                assert!(commands
                    .iter()
                    .all(|c| c.contains(r#"issueIdOrKey="PROJ-9""#)));
            }
            other => panic!("expected calculated transition, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_serializes_with_type_tag() {
        let plan = plan_transition(&request("SI-1", "done", None), &TransitionResolver::default());
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["type"], "instruction_orchestration");
        assert_eq!(value["status_aliases"][0]["status"], "In Development");
    }
}
