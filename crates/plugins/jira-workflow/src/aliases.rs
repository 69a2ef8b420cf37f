//! Status aliases.
//!
//! Short, case-insensitive synonyms for canonical statuses, so callers can say
//! `dev` or `qa` instead of `In Development` or `Ready for Validation`.

use tracing::debug;

use crate::graph::{
    BLOCKED, CLOSED, IN_DEFINITION, IN_DESIGN, IN_DEVELOPMENT, IN_VALIDATION, JIRA_WORKFLOW, OPEN,
    READY_FOR_CODEREVIEW, READY_FOR_ENG, READY_FOR_VALIDATION, REOPENED, RESOLVED, WONT_DO,
};

/// Canonical status to its aliases. Lookup order is table order; the first
/// match wins if an alias were ever listed twice.
pub static STATUS_ALIASES: &[(&str, &[&str])] = &[
    (
        IN_DEVELOPMENT,
        &["dev", "development", "start", "begin", "work", "code"],
    ),
    (READY_FOR_CODEREVIEW, &["review", "codereview", "cr", "pr"]),
    (READY_FOR_VALIDATION, &["validation", "qa", "test", "testing"]),
    (IN_VALIDATION, &["validating", "validate", "val"]),
    (RESOLVED, &["done", "resolved"]),
    (IN_DEFINITION, &["definition", "define"]),
    (READY_FOR_ENG, &["eng", "ready", "engineering"]),
    (IN_DESIGN, &["design"]),
    (OPEN, &["open"]),
    (BLOCKED, &["blocked", "block", "stop"]),
    (CLOSED, &["closed", "close", "complete", "finish", "end"]),
    (WONT_DO, &["wont", "cancel", "skip"]),
    (REOPENED, &["reopened", "reopen"]),
];

/// Canonical status for `alias`, if it is one.
pub fn lookup_alias(alias: &str) -> Option<&'static str> {
    let alias = alias.trim();
    STATUS_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|a| a.eq_ignore_ascii_case(alias)))
        .map(|(status, _)| *status)
}

/// Resolve user input to a status name.
///
/// Aliases win, then canonical names in any letter case. Anything else is
/// returned trimmed but otherwise untouched; the caller decides what an
/// unknown status means.
pub fn resolve_alias(input: &str) -> String {
    let input = input.trim();

    if let Some(status) = lookup_alias(input) {
        debug!(input, status, "Resolved status alias");
        return status.to_string();
    }

    match JIRA_WORKFLOW.canonical(input) {
        Some(status) => status.to_string(),
        None => input.to_string(),
    }
}
