//! Transition path resolver.
//!
//! Resolution order:
//!
//! 1. Reject an empty `from_status`
//! 2. Preset shortcut in `from_status` - the preset's pair replaces the
//!    request (an explicit `to_status` is reported as ignored) and is
//!    resolved inline
//! 3. Missing `to_status` without a preset
//! 4. Alias resolution of both ends
//! 5. Same status, direct edge, breadth-first path, or no path
//!
//! The resolver never fails: internal errors come back as
//! [`TransitionResult::Error`].

use myt_core::config::DEFAULT_CLOUD_ID;
use myt_core::{Error, Result};
use tracing::{debug, info, warn};

use crate::aliases::resolve_alias;
use crate::command::transition_command;
use crate::graph::{WorkflowGraph, JIRA_WORKFLOW};
use crate::presets::{find_preset, preset_names, Preset, PRESETS};
use crate::result::{PresetSummary, TransitionResult, TransitionStep};

/// Resolves status pairs against a workflow graph.
#[derive(Debug, Clone)]
pub struct TransitionResolver {
    graph: &'static WorkflowGraph,
    cloud_id: String,
}

impl TransitionResolver {
    /// Create a resolver rendering commands for `cloud_id`.
    pub fn new(cloud_id: impl Into<String>) -> Self {
        Self {
            graph: &JIRA_WORKFLOW,
            cloud_id: cloud_id.into(),
        }
    }

    pub fn cloud_id(&self) -> &str {
        &self.cloud_id
    }

    /// Resolve a transition request. An empty `to_status` means "not given".
    pub fn resolve(&self, from_status: &str, to_status: &str) -> TransitionResult {
        info!(from_status, to_status, "Calculating JIRA transition path");

        self.try_resolve(from_status, to_status)
            .unwrap_or_else(|err| {
                warn!(error = %err, "Error calculating JIRA transitions");
                TransitionResult::from_error(&err)
            })
    }

    /// Resolve two statuses as statuses only. Preset keywords are read as
    /// the aliases they also are, e.g. `qa` is Ready for Validation.
    pub fn resolve_statuses(&self, from_status: &str, to_status: &str) -> TransitionResult {
        info!(from_status, to_status, "Calculating JIRA transition path between statuses");

        let from_status = from_status.trim();
        let to_status = to_status.trim();
        let result = if from_status.is_empty() {
            Err(Error::Validation("from_status cannot be empty".to_string()))
        } else if to_status.is_empty() {
            Err(Error::Validation("to_status cannot be empty".to_string()))
        } else {
            self.resolve_pair(from_status, to_status)
        };

        result.unwrap_or_else(|err| {
            warn!(error = %err, "Error calculating JIRA transitions");
            TransitionResult::from_error(&err)
        })
    }

    fn try_resolve(&self, from_status: &str, to_status: &str) -> Result<TransitionResult> {
        let from_status = from_status.trim();
        let to_status = to_status.trim();

        if from_status.is_empty() {
            return Err(Error::Validation("from_status cannot be empty".to_string()));
        }

        if let Some(preset) = find_preset(from_status) {
            return self.resolve_preset(preset, to_status);
        }

        if to_status.is_empty() {
            return Ok(missing_to_status());
        }

        self.resolve_pair(from_status, to_status)
    }

    fn resolve_preset(&self, preset: &'static Preset, to_status: &str) -> Result<TransitionResult> {
        info!(preset = preset.name, "Using preset: {}", preset.description);
        let resolution = Box::new(self.resolve_pair(preset.from, preset.to)?);

        if !to_status.is_empty() {
            return Ok(TransitionResult::PresetWithOverride {
                message: format!(
                    "Note: '{}' is a preset shortcut. Using preset path instead of override.",
                    preset.name
                ),
                preset_used: preset.name.to_string(),
                preset_description: preset.description.to_string(),
                from_status: preset.from.to_string(),
                to_status: preset.to.to_string(),
                warning: format!(
                    "Ignoring to_status='{}' in favor of preset path",
                    to_status
                ),
                resolution,
            });
        }

        Ok(TransitionResult::PresetShortcut {
            message: format!("Using preset workflow: {}", preset.description),
            preset_name: preset.name.to_string(),
            preset_description: preset.description.to_string(),
            from_status: preset.from.to_string(),
            to_status: preset.to.to_string(),
            resolution,
        })
    }

    /// Steps 4-5: aliases, then equality, direct edge, BFS, no path.
    fn resolve_pair(&self, from_status: &str, to_status: &str) -> Result<TransitionResult> {
        let from = resolve_alias(from_status);
        let to = resolve_alias(to_status);
        debug!(from = %from, to = %to, "Resolved statuses");

        if from == to {
            return Ok(TransitionResult::NoTransitionNeeded {
                message: format!("Already at target status: {}", to),
                from_status: from,
                to_status: to,
                transitions: Vec::new(),
            });
        }

        if let Some(transition) = self.graph.direct_transition(&from, &to) {
            return Ok(TransitionResult::DirectTransition {
                message: format!("Direct transition available: {} → {}", from, to),
                atlassian_command: transition_command(&self.cloud_id, transition.name),
                transitions: vec![TransitionStep::new(&from, &to, transition.name)],
                from_status: from,
                to_status: to,
            });
        }

        if let Some(path) = self.graph.shortest_path(&from, &to)? {
            if path.is_empty() {
                return Err(Error::Workflow(format!(
                    "Empty path between distinct statuses '{}' and '{}'",
                    from, to
                )));
            }

            return Ok(TransitionResult::MultiStepTransition {
                message: format!(
                    "Multi-step transition path: {} → {} ({} steps)",
                    from,
                    to,
                    path.len()
                ),
                atlassian_commands: path
                    .iter()
                    .map(|step| transition_command(&self.cloud_id, &step.transition_name))
                    .collect(),
                path_summary: path
                    .iter()
                    .map(|step| step.to.as_str())
                    .collect::<Vec<_>>()
                    .join(" → "),
                transitions: path,
                from_status: from,
                to_status: to,
            });
        }

        let available: Vec<String> = self
            .graph
            .transitions_from(&from)
            .iter()
            .map(|t| t.to.to_string())
            .collect();
        warn!(from = %from, to = %to, "No transition path found");

        Ok(TransitionResult::NoTransitionPath {
            message: format!("No transition path found from '{}' to '{}'", from, to),
            suggestion: if available.is_empty() {
                "No transitions available from current status".to_string()
            } else {
                format!("Available next steps: {}", available.join(", "))
            },
            available_from_current: available,
            transitions: Vec::new(),
            from_status: from,
            to_status: to,
        })
    }
}

impl Default for TransitionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CLOUD_ID)
    }
}

fn missing_to_status() -> TransitionResult {
    TransitionResult::MissingToStatus {
        message: "to_status is required when not using preset shortcuts".to_string(),
        available_presets: preset_names(),
        preset_examples: PRESETS
            .iter()
            .map(|p| PresetSummary {
                name: p.name,
                description: p.description,
            })
            .collect(),
        error: format!(
            "Either provide to_status or use a preset shortcut ({})",
            preset_names().join(", ")
        ),
    }
}
