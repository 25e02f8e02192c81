//! Node variants for the work graph.
//!
//! A [`WorkNode`] is a unit of work with an opaque payload. The payload type
//! is generic; the codec layer decides how it is serialized. The node variant
//! is an explicit [`NodeKind`] discriminant so that the task-only edge
//! constraint is visible in the type rather than hidden behind a runtime
//! type test.

use serde::{Deserialize, Serialize};

/// Discriminant for the two node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A generic work node. Carries dependency successors only.
    Generic,
    /// A task node. Additionally carries must-run and finalizing successors,
    /// both restricted to task-node members.
    Task,
}

impl NodeKind {
    /// Returns `true` for the task variant.
    pub fn is_task(&self) -> bool {
        matches!(self, NodeKind::Task)
    }
}

/// A unit of work in the plan graph.
///
/// The payload is opaque state specific to the node's kind of work; this
/// crate never inspects it. Edges live in the surrounding [`WorkGraph`],
/// not on the node itself.
///
/// [`WorkGraph`]: crate::graph::WorkGraph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkNode<P> {
    /// Node-kind-specific opaque state.
    pub payload: P,
    kind: NodeKind,
    dependencies_processed: bool,
}

impl<P> WorkNode<P> {
    pub(crate) fn new(kind: NodeKind, payload: P) -> Self {
        WorkNode {
            payload,
            kind,
            dependencies_processed: false,
        }
    }

    /// Returns the node's variant discriminant.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns `true` if this is a task node.
    pub fn is_task(&self) -> bool {
        self.kind.is_task()
    }

    /// Returns `true` once all incoming edge information has been attached.
    ///
    /// The decode path sets this after reattaching a node's edge sets; an
    /// external scheduler consumes the signal.
    pub fn dependencies_processed(&self) -> bool {
        self.dependencies_processed
    }

    pub(crate) fn mark_dependencies_processed(&mut self) {
        self.dependencies_processed = true;
    }
}
