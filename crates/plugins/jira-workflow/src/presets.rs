//! Preset shortcuts for common transitions.

use serde::Serialize;

use crate::graph::{
    IN_DEVELOPMENT, IN_VALIDATION, OPEN, READY_FOR_CODEREVIEW, READY_FOR_VALIDATION, RESOLVED,
};

/// A named `(from, to)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub description: &'static str,
}

const START_DEVELOPMENT: &str = "Start development work (Open → In Development)";
const SUBMIT_REVIEW: &str = "Submit for code review (In Development → Ready For Codereview)";
const MOVE_TO_QA: &str = "Move to QA testing (Ready For Codereview → Ready for Validation)";
const MARK_COMPLETE: &str = "Mark as complete (In Validation → Resolved)";

/// All presets, in the order they are listed to callers.
pub static PRESETS: &[Preset] = &[
    Preset {
        name: "start",
        from: OPEN,
        to: IN_DEVELOPMENT,
        description: START_DEVELOPMENT,
    },
    Preset {
        name: "dev",
        from: OPEN,
        to: IN_DEVELOPMENT,
        description: START_DEVELOPMENT,
    },
    Preset {
        name: "review",
        from: IN_DEVELOPMENT,
        to: READY_FOR_CODEREVIEW,
        description: SUBMIT_REVIEW,
    },
    Preset {
        name: "pr",
        from: IN_DEVELOPMENT,
        to: READY_FOR_CODEREVIEW,
        description: SUBMIT_REVIEW,
    },
    Preset {
        name: "qa",
        from: READY_FOR_CODEREVIEW,
        to: READY_FOR_VALIDATION,
        description: MOVE_TO_QA,
    },
    Preset {
        name: "test",
        from: READY_FOR_CODEREVIEW,
        to: READY_FOR_VALIDATION,
        description: MOVE_TO_QA,
    },
    Preset {
        name: "done",
        from: IN_VALIDATION,
        to: RESOLVED,
        description: MARK_COMPLETE,
    },
];

/// Preset named `keyword`, compared case-insensitively after trimming.
pub fn find_preset(keyword: &str) -> Option<&'static Preset> {
    let keyword = keyword.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(keyword))
}

/// Names of all presets, in table order.
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::JIRA_WORKFLOW;

    #[test]
    fn test_find_preset() {
        let preset = find_preset(" QA ").unwrap();
        assert_eq!(preset.name, "qa");
        assert_eq!(preset.from, READY_FOR_CODEREVIEW);
        assert_eq!(preset.to, READY_FOR_VALIDATION);

        assert!(find_preset("ship").is_none());
        assert!(find_preset("").is_none());
    }

    #[test]
    fn test_preset_endpoints_are_canonical() {
        for preset in PRESETS {
            assert!(JIRA_WORKFLOW.contains(preset.from), "{}", preset.name);
            assert!(JIRA_WORKFLOW.contains(preset.to), "{}", preset.name);
        }
    }

    #[test]
    fn test_preset_targets_are_reachable() {
        for preset in PRESETS {
            let path = JIRA_WORKFLOW.shortest_path(preset.from, preset.to).unwrap();
            assert!(path.is_some_and(|p| !p.is_empty()), "{}", preset.name);
        }
    }

    #[test]
    fn test_preset_names_order() {
        assert_eq!(
            preset_names(),
            vec!["start", "dev", "review", "pr", "qa", "test", "done"]
        );
    }
}
