//! Plan encoding: successors-first traversal and record emission.
//!
//! [`write_plan`] first computes an explicit topological order of everything
//! reachable from the root set, using an iterative worklist with tri-state
//! visit marks. This bounds the traversal (no recursion, so a deep graph
//! cannot exhaust the stack), reports true cycles as [`CodecError::Cycle`]
//! instead of diverging, and yields the total node count before the first
//! record is emitted. Nodes appearing several times in the root list, or
//! reachable along several paths, are visited once.
//!
//! Dense stream ids are the positions in that order, so every successor's id
//! is strictly smaller than the id of any node referencing it. That ordering
//! is what lets the reader resolve every edge in a single forward pass.

use std::collections::HashMap;
use std::io::Write;

use workplan_core::{CoreError, NodeId, WorkGraph};

use crate::error::CodecError;
use crate::payload::NodeCodec;
use crate::scope::WriteScope;
use crate::successors;
use crate::varint;

/// Serializes the subgraph reachable from `roots` to `out`.
///
/// The writer does not mutate the graph. On error the stream contents are
/// unspecified and must be discarded.
pub fn write_plan<W, C>(
    out: &mut W,
    graph: &WorkGraph<C::Payload>,
    roots: &[NodeId],
    codec: &mut C,
) -> Result<(), CodecError>
where
    W: Write + ?Sized,
    C: NodeCodec,
{
    let order = topological_order(graph, roots)?;
    let ids: HashMap<NodeId, u32> = order
        .iter()
        .enumerate()
        .map(|(position, &node)| (node, position as u32))
        .collect();

    let mut scope = WriteScope::new();
    varint::write_len(out, order.len())?;
    for (position, &node_id) in order.iter().enumerate() {
        let node = graph
            .node(node_id)
            .ok_or(CoreError::NodeNotFound { id: node_id })?;
        varint::write_u64(out, position as u64)?;
        codec.write_node(out, &mut scope, node.kind(), &node.payload)?;
        successors::write_successors(out, &ids, graph.dependency_successors(node_id))?;
        if node.is_task() {
            successors::write_successors(out, &ids, graph.must_successors(node_id))?;
            successors::write_successors(out, &ids, graph.finalizing_successors(node_id))?;
        }
        tracing::trace!(id = position, task = node.is_task(), "wrote node record");
    }
    tracing::debug!(nodes = order.len(), roots = roots.len(), "serialized work plan");
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    Visiting,
    Visited,
}

struct Frame {
    node: NodeId,
    successors: Vec<NodeId>,
    next: usize,
}

impl Frame {
    fn enter<P>(graph: &WorkGraph<P>, node: NodeId) -> Self {
        Frame {
            node,
            successors: graph.all_successors(node).collect(),
            next: 0,
        }
    }
}

/// Computes a successors-first (postorder) ordering of every node reachable
/// from `roots`, visiting dependency, must-run, and finalizing edges alike.
///
/// Fails with [`CodecError::Cycle`] when a node is reachable from itself and
/// with `NodeNotFound` when a root is not part of the graph.
pub(crate) fn topological_order<P>(
    graph: &WorkGraph<P>,
    roots: &[NodeId],
) -> Result<Vec<NodeId>, CodecError> {
    let mut state: HashMap<NodeId, Visit> = HashMap::new();
    let mut order = Vec::new();

    for &root in roots {
        if !graph.contains(root) {
            return Err(CoreError::NodeNotFound { id: root }.into());
        }
        if state.get(&root) == Some(&Visit::Visited) {
            continue;
        }
        state.insert(root, Visit::Visiting);
        let mut stack = vec![Frame::enter(graph, root)];

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let next = {
                let frame = &mut stack[top];
                if frame.next < frame.successors.len() {
                    let successor = frame.successors[frame.next];
                    frame.next += 1;
                    Some(successor)
                } else {
                    None
                }
            };
            match next {
                Some(successor) => match state.get(&successor) {
                    Some(Visit::Visited) => {}
                    Some(Visit::Visiting) => {
                        return Err(CodecError::Cycle { id: successor });
                    }
                    None => {
                        state.insert(successor, Visit::Visiting);
                        stack.push(Frame::enter(graph, successor));
                    }
                },
                None => {
                    if let Some(frame) = stack.pop() {
                        state.insert(frame.node, Visit::Visited);
                        order.push(frame.node);
                    }
                }
            }
        }
    }
    Ok(order)
}
