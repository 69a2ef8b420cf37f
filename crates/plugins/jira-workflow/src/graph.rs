//! The JIRA workflow graph.
//!
//! Nodes are canonical status names, edges are labelled with the transition
//! name JIRA expects. The table is fixed at compile time and edges are kept in
//! insertion order, which is also the order breadth-first search explores them.

use std::collections::{HashMap, HashSet, VecDeque};

use myt_core::{Error, Result};

use crate::result::TransitionStep;

pub const OPEN: &str = "Open";
pub const IN_DEFINITION: &str = "In Definition";
pub const READY_FOR_ENG: &str = "Ready For Eng";
pub const IN_DEVELOPMENT: &str = "In Development";
pub const READY_FOR_CODEREVIEW: &str = "Ready For Codereview";
pub const READY_FOR_VALIDATION: &str = "Ready for Validation";
pub const IN_VALIDATION: &str = "In Validation";
pub const RESOLVED: &str = "Resolved";
pub const BLOCKED: &str = "Blocked";
pub const CLOSED: &str = "Closed";
pub const REOPENED: &str = "Reopened";
pub const IN_DESIGN: &str = "In Design";
pub const WONT_DO: &str = "Won't Do";

/// A labelled outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Target status
    pub to: &'static str,
    /// Transition name as shown in JIRA
    pub name: &'static str,
}

const fn edge(to: &'static str, name: &'static str) -> Transition {
    Transition { to, name }
}

/// Directed status graph with labelled edges.
#[derive(Debug)]
pub struct WorkflowGraph {
    statuses: &'static [&'static str],
    edges: &'static [(&'static str, &'static [Transition])],
}

/// The workflow every ticket follows.
pub static JIRA_WORKFLOW: WorkflowGraph = WorkflowGraph {
    statuses: &[
        OPEN,
        IN_DEFINITION,
        READY_FOR_ENG,
        IN_DEVELOPMENT,
        READY_FOR_CODEREVIEW,
        READY_FOR_VALIDATION,
        IN_VALIDATION,
        RESOLVED,
        BLOCKED,
        CLOSED,
        REOPENED,
        IN_DESIGN,
        WONT_DO,
    ],
    edges: &[
        (
            OPEN,
            &[
                edge(IN_DEFINITION, "Start Definition"),
                edge(CLOSED, "Close Issue"),
            ],
        ),
        (
            IN_DEFINITION,
            &[
                edge(READY_FOR_ENG, "Ready for Engineering"),
                edge(OPEN, "Reopen"),
                edge(BLOCKED, "Block"),
            ],
        ),
        (
            READY_FOR_ENG,
            &[
                edge(IN_DEVELOPMENT, "Start Progress"),
                edge(IN_DEFINITION, "Back to Definition"),
                edge(BLOCKED, "Block"),
            ],
        ),
        (
            IN_DEVELOPMENT,
            &[
                edge(READY_FOR_CODEREVIEW, "Ready for Code Review"),
                edge(IN_DEFINITION, "Back to Definition"),
                edge(BLOCKED, "Block"),
            ],
        ),
        (
            READY_FOR_CODEREVIEW,
            &[
                edge(READY_FOR_VALIDATION, "Ready for QA"),
                edge(IN_DEVELOPMENT, "Back to Development"),
                edge(BLOCKED, "Block"),
            ],
        ),
        (
            READY_FOR_VALIDATION,
            &[
                edge(IN_VALIDATION, "Start Validation"),
                edge(IN_DEVELOPMENT, "Back to Development"),
                edge(BLOCKED, "Block"),
            ],
        ),
        (
            IN_VALIDATION,
            &[
                edge(RESOLVED, "Resolve Issue"),
                edge(IN_DEVELOPMENT, "Reject"),
                edge(READY_FOR_VALIDATION, "Back to Ready for Validation"),
            ],
        ),
        (
            RESOLVED,
            &[
                edge(CLOSED, "Close Issue"),
                edge(REOPENED, "Reopen"),
                edge(IN_VALIDATION, "Reopen for Validation"),
            ],
        ),
        (
            BLOCKED,
            &[
                edge(IN_DEFINITION, "Unblock to Definition"),
                edge(READY_FOR_ENG, "Unblock to Ready for Eng"),
                edge(IN_DEVELOPMENT, "Unblock to Development"),
                edge(READY_FOR_CODEREVIEW, "Unblock to Code Review"),
            ],
        ),
    ],
};

impl WorkflowGraph {
    /// All canonical statuses, in declaration order.
    pub fn statuses(&self) -> &'static [&'static str] {
        self.statuses
    }

    /// Whether `status` is a canonical status (exact spelling).
    pub fn contains(&self, status: &str) -> bool {
        self.statuses.contains(&status)
    }

    /// Canonical spelling of `status`, compared case-insensitively.
    pub fn canonical(&self, status: &str) -> Option<&'static str> {
        self.statuses
            .iter()
            .copied()
            .find(|s| s.eq_ignore_ascii_case(status))
    }

    /// Outgoing edges of `status`; empty for terminal or unknown statuses.
    pub fn transitions_from(&self, status: &str) -> &'static [Transition] {
        self.edges
            .iter()
            .find(|(from, _)| *from == status)
            .map(|(_, transitions)| *transitions)
            .unwrap_or(&[])
    }

    /// The edge `from -> to`, if one exists.
    pub fn direct_transition(&self, from: &str, to: &str) -> Option<&'static Transition> {
        self.transitions_from(from).iter().find(|t| t.to == to)
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|(_, transitions)| transitions.len()).sum()
    }

    /// Shortest path by hop count from `from` to `to`.
    ///
    /// Breadth-first, exploring edges in table order. A status is marked
    /// visited when first enqueued, so each node is expanded at most once.
    /// Returns `Ok(None)` when `to` is unreachable and an empty path when
    /// `from == to`.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Option<Vec<TransitionStep>>> {
        if from == to {
            return Ok(Some(Vec::new()));
        }

        let Some(start) = self
            .edges
            .iter()
            .map(|(status, _)| *status)
            .find(|status| *status == from)
        else {
            return Ok(None);
        };

        let mut visited: HashSet<&'static str> = HashSet::from([start]);
        let mut parents: HashMap<&'static str, (&'static str, &'static Transition)> =
            HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for transition in self.transitions_from(current) {
                if !visited.insert(transition.to) {
                    continue;
                }
                parents.insert(transition.to, (current, transition));

                if transition.to == to {
                    return self.rebuild_path(start, transition.to, &parents).map(Some);
                }
                queue.push_back(transition.to);
            }
        }

        Ok(None)
    }

    fn rebuild_path(
        &self,
        start: &'static str,
        target: &'static str,
        parents: &HashMap<&'static str, (&'static str, &'static Transition)>,
    ) -> Result<Vec<TransitionStep>> {
        let mut steps = Vec::new();
        let mut cursor = target;

        while cursor != start {
            let &(previous, transition) = parents.get(cursor).ok_or_else(|| {
                Error::Workflow(format!("No predecessor recorded for '{}'", cursor))
            })?;
            steps.push(TransitionStep::new(previous, transition.to, transition.name));
            cursor = previous;

            if steps.len() > self.edge_count() {
                return Err(Error::Workflow(format!(
                    "Predecessor chain from '{}' to '{}' does not terminate",
                    start, target
                )));
            }
        }

        steps.reverse();
        Ok(steps)
    }

    /// Check the table for data-entry mistakes.
    ///
    /// Every edge endpoint must be a declared status, each status may own at
    /// most one edge list, and no edge list may name the same target twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen_sources = HashSet::new();

        for (from, transitions) in self.edges {
            if !self.contains(from) {
                return Err(Error::Workflow(format!("Unknown source status '{}'", from)));
            }
            if !seen_sources.insert(*from) {
                return Err(Error::Workflow(format!(
                    "Status '{}' has more than one edge list",
                    from
                )));
            }

            let mut targets = HashSet::new();
            for transition in *transitions {
                if !self.contains(transition.to) {
                    return Err(Error::Workflow(format!(
                        "Edge '{}' from '{}' points at unknown status '{}'",
                        transition.name, from, transition.to
                    )));
                }
                if !targets.insert(transition.to) {
                    return Err(Error::Workflow(format!(
                        "Duplicate edge '{}' -> '{}'",
                        from, transition.to
                    )));
                }
            }
        }

        Ok(())
    }
}
