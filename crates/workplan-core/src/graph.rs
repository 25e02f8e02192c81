//! WorkGraph: the arena container for a work execution plan.
//!
//! [`WorkGraph`] wraps a petgraph `StableGraph` whose node weights are
//! [`WorkNode`]s and whose edge weights are [`WorkEdge`] kinds. The graph is
//! private; all mutations go through `WorkGraph` methods which enforce the
//! edge invariants:
//!
//! - edge sets are sets (at most one edge of a kind between an ordered pair);
//! - must-run and finalizing edges connect task nodes only.
//!
//! Node identity is the stable arena index ([`NodeId`]); a successor is an
//! edge to another slot rather than an owning pointer. The in-memory graph
//! may contain cycles -- acyclicity is a serialization-time precondition
//! checked by the codec layer, not a construction-time constraint.

use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use crate::edge::WorkEdge;
use crate::error::CoreError;
use crate::id::NodeId;
use crate::node::{NodeKind, WorkNode};

/// A directed graph of work nodes with three categories of successor edges.
#[derive(Debug, Clone)]
pub struct WorkGraph<P> {
    nodes: StableGraph<WorkNode<P>, WorkEdge, Directed, u32>,
}

impl<P> Default for WorkGraph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> WorkGraph<P> {
    /// Creates an empty work graph.
    pub fn new() -> Self {
        WorkGraph {
            nodes: StableGraph::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Adds a generic work node and returns its identity.
    pub fn add_node(&mut self, payload: P) -> NodeId {
        NodeId::from(self.nodes.add_node(WorkNode::new(NodeKind::Generic, payload)))
    }

    /// Adds a task node and returns its identity.
    pub fn add_task(&mut self, payload: P) -> NodeId {
        NodeId::from(self.nodes.add_node(WorkNode::new(NodeKind::Task, payload)))
    }

    /// Adds a dependency edge from `node` to `successor`.
    ///
    /// Valid for every node variant. Re-adding an existing edge is a no-op
    /// (edge sets have set semantics).
    pub fn add_dependency_successor(
        &mut self,
        node: NodeId,
        successor: NodeId,
    ) -> Result<(), CoreError> {
        self.add_successor(node, successor, WorkEdge::Dependency)
    }

    /// Adds a must-run-after ordering edge from `node` to `successor`.
    ///
    /// Both endpoints must be task nodes.
    pub fn add_must_successor(
        &mut self,
        node: NodeId,
        successor: NodeId,
    ) -> Result<(), CoreError> {
        self.add_successor(node, successor, WorkEdge::Must)
    }

    /// Adds a finalizing edge from `node` to `successor`.
    ///
    /// Both endpoints must be task nodes.
    pub fn add_finalizing_successor(
        &mut self,
        node: NodeId,
        successor: NodeId,
    ) -> Result<(), CoreError> {
        self.add_successor(node, successor, WorkEdge::Finalizing)
    }

    fn add_successor(
        &mut self,
        node: NodeId,
        successor: NodeId,
        edge: WorkEdge,
    ) -> Result<(), CoreError> {
        self.require_node(node)?;
        self.require_node(successor)?;

        if edge.is_task_only() {
            for id in [node, successor] {
                if !self.is_task(id) {
                    return Err(CoreError::TaskEdgeConstraint { edge, id });
                }
            }
        }

        // Set semantics: skip if an edge of this kind already connects the pair.
        let already_present = self
            .nodes
            .edges_directed(node.into(), Direction::Outgoing)
            .any(|e| *e.weight() == edge && NodeId::from(e.target()) == successor);
        if !already_present {
            self.nodes.add_edge(node.into(), successor.into(), edge);
        }
        Ok(())
    }

    /// Marks the node's incoming edge information as fully attached.
    ///
    /// Called by the decode path after reattaching all three edge sets; the
    /// resulting flag is a completion signal for an external scheduler.
    pub fn mark_dependencies_processed(&mut self, node: NodeId) -> Result<(), CoreError> {
        let weight = self
            .nodes
            .node_weight_mut(node.into())
            .ok_or(CoreError::NodeNotFound { id: node })?;
        weight.mark_dependencies_processed();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Returns the node for `id`, if present.
    pub fn node(&self, id: NodeId) -> Option<&WorkNode<P>> {
        self.nodes.node_weight(id.into())
    }

    /// Returns `true` if `id` names a node in this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_node(id.into())
    }

    /// Returns `true` if `id` names a task node. Unknown ids are not tasks.
    pub fn is_task(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(WorkNode::is_task)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.node_count()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.node_count() == 0
    }

    /// Iterates over all node identities.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.node_indices().map(NodeId::from)
    }

    /// Iterates over the successors of `node` reached by `edge`-kind edges.
    ///
    /// Iteration order within one edge set is unspecified; the set is
    /// unordered by contract.
    pub fn successors(&self, node: NodeId, edge: WorkEdge) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .edges_directed(node.into(), Direction::Outgoing)
            .filter(move |e| *e.weight() == edge)
            .map(|e| NodeId::from(e.target()))
    }

    /// The node's dependency successors.
    pub fn dependency_successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors(node, WorkEdge::Dependency)
    }

    /// The node's must-run successors (task nodes only; empty otherwise).
    pub fn must_successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors(node, WorkEdge::Must)
    }

    /// The node's finalizing successors (task nodes only; empty otherwise).
    pub fn finalizing_successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors(node, WorkEdge::Finalizing)
    }

    /// All successors across the three edge kinds: dependency, then must,
    /// then finalizing. This is the traversal order the writer visits in.
    pub fn all_successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.dependency_successors(node)
            .chain(self.must_successors(node))
            .chain(self.finalizing_successors(node))
    }

    fn require_node(&self, id: NodeId) -> Result<(), CoreError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(CoreError::NodeNotFound { id })
        }
    }
}
