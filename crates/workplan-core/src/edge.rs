//! Edge kinds for the work graph.
//!
//! Every edge points from a node to one of its successors. Dependency edges
//! apply to all node variants; must-run and finalizing edges are ordering
//! constraints that only connect task nodes.

use serde::{Deserialize, Serialize};

/// The category of a successor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkEdge {
    /// The successor must be available/complete before this node can run.
    /// Valid for every node variant.
    Dependency,
    /// Ordering-only constraint with no data dependency implication.
    /// Task nodes only, on both endpoints.
    Must,
    /// The successor should run after this node if it is scheduled at all.
    /// Task nodes only, on both endpoints.
    Finalizing,
}

impl WorkEdge {
    /// Returns `true` if this edge kind is restricted to task nodes.
    pub fn is_task_only(&self) -> bool {
        matches!(self, WorkEdge::Must | WorkEdge::Finalizing)
    }
}
