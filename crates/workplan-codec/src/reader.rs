//! Plan decoding: single forward pass reconstruction.
//!
//! Because the writer emits every node after its successors, the reader can
//! resolve each edge set against the nodes decoded so far -- there are no
//! placeholders and no patch-up pass. Each record becomes a fresh node in a
//! new [`WorkGraph`]; edges are reattached through the graph's mutation
//! methods, which re-enforce the task-only constraint on must-run and
//! finalizing successors, so a corrupt or hand-crafted stream cannot smuggle
//! an invalid edge in.

use std::collections::HashMap;
use std::io::Read;

use workplan_core::{NodeId, NodeKind, WorkGraph};

use crate::error::CodecError;
use crate::payload::NodeCodec;
use crate::scope::ReadScope;
use crate::successors;
use crate::varint;

/// A reconstructed plan.
#[derive(Debug)]
pub struct ReadPlan<P> {
    /// The rebuilt graph, structurally isomorphic to the one written.
    pub graph: WorkGraph<P>,
    /// All reconstructed nodes in stream order (successors-first). The
    /// original root partitioning is not restored; callers needing it must
    /// derive it externally.
    pub nodes: Vec<NodeId>,
}

/// Deserializes a plan previously produced by [`write_plan`].
///
/// On error the partially-built graph is discarded; the stream position is
/// unspecified.
///
/// [`write_plan`]: crate::writer::write_plan
pub fn read_plan<R, C>(input: &mut R, codec: &mut C) -> Result<ReadPlan<C::Payload>, CodecError>
where
    R: Read + ?Sized,
    C: NodeCodec,
{
    let mut scope = ReadScope::new();
    let count = varint::read_len(input)?;

    let mut graph = WorkGraph::new();
    let mut table: HashMap<u32, NodeId> = HashMap::with_capacity(count.min(1024));
    let mut nodes = Vec::with_capacity(count.min(1024));

    for _ in 0..count {
        let id = varint::read_u32(input)?;
        if table.contains_key(&id) {
            return Err(CodecError::DuplicateNodeId { id });
        }
        let (kind, payload) = codec.read_node(input, &mut scope)?;
        let node_id = match kind {
            NodeKind::Generic => graph.add_node(payload),
            NodeKind::Task => graph.add_task(payload),
        };

        successors::read_successors(input, &table, |succ| {
            Ok(graph.add_dependency_successor(node_id, succ)?)
        })?;
        if kind.is_task() {
            successors::read_successors(input, &table, |succ| {
                Ok(graph.add_must_successor(node_id, succ)?)
            })?;
            successors::read_successors(input, &table, |succ| {
                Ok(graph.add_finalizing_successor(node_id, succ)?)
            })?;
        }

        graph.mark_dependencies_processed(node_id)?;
        table.insert(id, node_id);
        nodes.push(node_id);
        tracing::trace!(id, task = kind.is_task(), "read node record");
    }

    tracing::debug!(nodes = nodes.len(), "deserialized work plan");
    Ok(ReadPlan { graph, nodes })
}
