//! Transition results.
//!
//! Results serialize with a `type` discriminator and only the fields that
//! belong to that kind of result, e.g.
//!
//! ```text
//! {"type": "direct_transition", "from_status": "In Development", ...}
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One edge of a transition path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionStep {
    pub from: String,
    pub to: String,
    pub transition_name: String,
}

impl TransitionStep {
    pub fn new(from: &str, to: &str, transition_name: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            transition_name: transition_name.to_string(),
        }
    }
}

/// Preset name and what it does, listed when a target status is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSummary {
    pub name: &'static str,
    pub description: &'static str,
}

/// Outcome of resolving a `(from_status, to_status)` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionResult {
    /// A preset was named together with an explicit target; the preset won.
    PresetWithOverride {
        message: String,
        preset_used: String,
        preset_description: String,
        from_status: String,
        to_status: String,
        warning: String,
        /// Resolution of the preset's own pair
        resolution: Box<TransitionResult>,
    },

    /// A preset was named on its own.
    PresetShortcut {
        message: String,
        preset_name: String,
        preset_description: String,
        from_status: String,
        to_status: String,
        /// Resolution of the preset's pair
        resolution: Box<TransitionResult>,
    },

    /// No target and no preset to infer one from.
    MissingToStatus {
        message: String,
        available_presets: Vec<&'static str>,
        /// Serialized as `{name: description}` in table order
        #[serde(serialize_with = "serialize_preset_examples")]
        preset_examples: Vec<PresetSummary>,
        error: String,
    },

    NoTransitionNeeded {
        message: String,
        from_status: String,
        to_status: String,
        transitions: Vec<TransitionStep>,
    },

    DirectTransition {
        message: String,
        from_status: String,
        to_status: String,
        transitions: Vec<TransitionStep>,
        atlassian_command: String,
    },

    MultiStepTransition {
        message: String,
        from_status: String,
        to_status: String,
        transitions: Vec<TransitionStep>,
        atlassian_commands: Vec<String>,
        path_summary: String,
    },

    NoTransitionPath {
        message: String,
        from_status: String,
        to_status: String,
        transitions: Vec<TransitionStep>,
        available_from_current: Vec<String>,
        suggestion: String,
    },

    Error {
        message: String,
        error: String,
        error_type: String,
    },
}

fn serialize_preset_examples<S: Serializer>(
    examples: &[PresetSummary],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(examples.len()))?;
    for example in examples {
        map.serialize_entry(example.name, example.description)?;
    }
    map.end()
}

impl TransitionResult {
    /// Build an `Error` result from a core error.
    pub fn from_error(err: &myt_core::Error) -> Self {
        Self::Error {
            message: format!("Failed to calculate transition path: {}", err),
            error: err.to_string(),
            error_type: err.type_name().to_string(),
        }
    }

    /// The serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PresetWithOverride { .. } => "preset_with_override",
            Self::PresetShortcut { .. } => "preset_shortcut",
            Self::MissingToStatus { .. } => "missing_to_status",
            Self::NoTransitionNeeded { .. } => "no_transition_needed",
            Self::DirectTransition { .. } => "direct_transition",
            Self::MultiStepTransition { .. } => "multi_step_transition",
            Self::NoTransitionPath { .. } => "no_transition_path",
            Self::Error { .. } => "error",
        }
    }

    /// Resolved starting status, if the result carries one.
    pub fn from_status(&self) -> Option<&str> {
        match self {
            Self::PresetWithOverride { from_status, .. }
            | Self::PresetShortcut { from_status, .. }
            | Self::NoTransitionNeeded { from_status, .. }
            | Self::DirectTransition { from_status, .. }
            | Self::MultiStepTransition { from_status, .. }
            | Self::NoTransitionPath { from_status, .. } => Some(from_status.as_str()),
            Self::MissingToStatus { .. } | Self::Error { .. } => None,
        }
    }

    /// Resolved target status, if the result carries one.
    pub fn to_status(&self) -> Option<&str> {
        match self {
            Self::PresetWithOverride { to_status, .. }
            | Self::PresetShortcut { to_status, .. }
            | Self::NoTransitionNeeded { to_status, .. }
            | Self::DirectTransition { to_status, .. }
            | Self::MultiStepTransition { to_status, .. }
            | Self::NoTransitionPath { to_status, .. } => Some(to_status.as_str()),
            Self::MissingToStatus { .. } | Self::Error { .. } => None,
        }
    }

    /// The final path-level result; presets unwrap to their inline resolution.
    pub fn resolution(&self) -> &TransitionResult {
        match self {
            Self::PresetWithOverride { resolution, .. }
            | Self::PresetShortcut { resolution, .. } => resolution.resolution(),
            other => other,
        }
    }

    /// Steps to execute, in order. Empty when there is nothing to do.
    pub fn transitions(&self) -> &[TransitionStep] {
        match self.resolution() {
            Self::NoTransitionNeeded { transitions, .. }
            | Self::DirectTransition { transitions, .. }
            | Self::MultiStepTransition { transitions, .. }
            | Self::NoTransitionPath { transitions, .. } => transitions.as_slice(),
            _ => &[],
        }
    }

    /// Atlassian commands to execute, one per step.
    pub fn commands(&self) -> Vec<&str> {
        match self.resolution() {
            Self::DirectTransition {
                atlassian_command, ..
            } => vec![atlassian_command.as_str()],
            Self::MultiStepTransition {
                atlassian_commands,
                ..
            } => atlassian_commands.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.resolution(), Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn direct() -> TransitionResult {
        TransitionResult::DirectTransition {
            message: "Direct transition available: A → B".to_string(),
            from_status: "A".to_string(),
            to_status: "B".to_string(),
            transitions: vec![TransitionStep::new("A", "B", "Go")],
            atlassian_command: "cmd".to_string(),
        }
    }

    #[test]
    fn test_type_tag_matches_kind() {
        let value = serde_json::to_value(direct()).unwrap();
        assert_eq!(value["type"], json!("direct_transition"));
        assert_eq!(value["transitions"][0]["transition_name"], json!("Go"));
        assert_eq!(direct().kind(), "direct_transition");
    }

    #[test]
    fn test_preset_unwraps_to_resolution() {
        let result = TransitionResult::PresetShortcut {
            message: "Using preset workflow".to_string(),
            preset_name: "x".to_string(),
            preset_description: "x".to_string(),
            from_status: "A".to_string(),
            to_status: "B".to_string(),
            resolution: Box::new(direct()),
        };

        assert_eq!(result.resolution().kind(), "direct_transition");
        assert_eq!(result.transitions().len(), 1);
        assert_eq!(result.commands(), vec!["cmd"]);
        assert_eq!(result.from_status(), Some("A"));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], json!("preset_shortcut"));
        assert_eq!(value["resolution"]["type"], json!("direct_transition"));
    }

    #[test]
    fn test_error_from_core_error() {
        let err = myt_core::Error::Validation("from_status cannot be empty".to_string());
        let result = TransitionResult::from_error(&err);

        assert!(result.is_error());
        assert_eq!(result.from_status(), None);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], json!("error"));
        assert_eq!(value["error"], json!("from_status cannot be empty"));
        assert_eq!(value["error_type"], json!("ValidationError"));
    }
}
