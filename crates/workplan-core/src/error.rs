//! Core error types for workplan-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of graph construction and mutation.

use crate::edge::WorkEdge;
use crate::id::NodeId;
use thiserror::Error;

/// Core errors produced by the workplan-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A node id was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// A must-run or finalizing edge touched a non-task node. These edge
    /// kinds are valid only between task nodes, a structural invariant
    /// enforced on every mutation.
    #[error("{edge:?} edge requires a task node, but NodeId({id}) is not one", id = id.0)]
    TaskEdgeConstraint { edge: WorkEdge, id: NodeId },
}
