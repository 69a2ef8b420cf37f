//! Atlassian MCP command templates.
//!
//! The engine never talks to JIRA. It hands back the literal calls an agent
//! should make through the Atlassian MCP server.

/// Placeholder left in commands for the caller to substitute.
pub const TICKET_PLACEHOLDER: &str = "[TICKET_ID]";

/// Placeholder for a transition id the agent has to look up first.
pub const TRANSITION_ID_PLACEHOLDER: &str = "TRANSITION_ID";

/// `transitionJiraIssue` by transition name, ticket left as a placeholder.
pub fn transition_command(cloud_id: &str, transition_name: &str) -> String {
    format!(
        r#"mcp__atlassian__transitionJiraIssue(cloudId="{}", issueIdOrKey="{}", transition={{"name": "{}"}})"#,
        cloud_id, TICKET_PLACEHOLDER, transition_name
    )
}

/// `transitionJiraIssue` by transition id.
pub fn transition_by_id_command(cloud_id: &str, ticket_id: &str) -> String {
    format!(
        r#"mcp__atlassian__transitionJiraIssue(cloudId="{}", issueIdOrKey="{}", transition={{"id": "{}"}})"#,
        cloud_id, ticket_id, TRANSITION_ID_PLACEHOLDER
    )
}

/// `getJiraIssue` restricted to `fields`.
pub fn get_issue_command(cloud_id: &str, ticket_id: &str, fields: &[&str]) -> String {
    let fields = fields
        .iter()
        .map(|f| format!("\"{}\"", f))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"mcp__atlassian__getJiraIssue(cloudId="{}", issueIdOrKey="{}", fields=[{}])"#,
        cloud_id, ticket_id, fields
    )
}

/// `getTransitionsForJiraIssue` for a ticket.
pub fn get_transitions_command(cloud_id: &str, ticket_id: &str) -> String {
    format!(
        r#"mcp__atlassian__getTransitionsForJiraIssue(cloudId="{}", issueIdOrKey="{}")"#,
        cloud_id, ticket_id
    )
}

/// Replace the ticket placeholder with a real ticket id.
pub fn fill_ticket(command: &str, ticket_id: &str) -> String {
    command.replace(TICKET_PLACEHOLDER, ticket_id)
}
