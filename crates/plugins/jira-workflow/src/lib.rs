//! JIRA workflow transition engine for myt-tools.
//!
//! Given a current status (or a preset shortcut) and a target status, the
//! engine resolves both to canonical workflow states and works out how to
//! get from one to the other:
//!
//! - **Aliases**: `dev`, `qa`, `done`... map to canonical statuses
//! - **Presets**: `start`, `review`, `qa`... name a common `(from, to)` pair
//! - **Paths**: direct edge first, then breadth-first shortest path
//!
//! The result never executes anything. It carries ready-to-run Atlassian MCP
//! commands with the ticket id left as a placeholder.
//!
//! # Example
//!
//! ```ignore
//! use myt_jira_workflow::{resolve, TransitionResult};
//!
//! match resolve("Open", "In Development") {
//!     TransitionResult::MultiStepTransition { transitions, .. } => {
//!         assert_eq!(transitions.len(), 3);
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

pub mod aliases;
pub mod command;
pub mod graph;
pub mod planner;
pub mod presets;
pub mod resolver;
pub mod result;

pub use aliases::resolve_alias;
pub use graph::{Transition, WorkflowGraph, JIRA_WORKFLOW};
pub use planner::{plan_transition, TransitionPlan, TransitionPlanRequest};
pub use presets::{find_preset, Preset, PRESETS};
pub use resolver::TransitionResolver;
pub use result::{PresetSummary, TransitionResult, TransitionStep};

/// Resolve a transition with the default Atlassian cloud id.
pub fn resolve(from_status: &str, to_status: &str) -> TransitionResult {
    TransitionResolver::default().resolve(from_status, to_status)
}
