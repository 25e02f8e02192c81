//! Stable ID newtype for graph nodes.
//!
//! `NodeId` is a newtype wrapper over `u32`, providing type safety so that a
//! node identity cannot be accidentally confused with a raw stream id or a
//! collection index.

use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Stable node identifier. Maps to a petgraph `NodeIndex<u32>`.
///
/// This is the in-memory identity of a node within one [`WorkGraph`]: it is
/// never written to a serialized stream. The writer assigns separate dense
/// stream ids in visit order.
///
/// [`WorkGraph`]: crate::graph::WorkGraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Bridge between NodeId and petgraph's NodeIndex<u32>.

impl From<NodeIndex<u32>> for NodeId {
    fn from(idx: NodeIndex<u32>) -> Self {
        NodeId(idx.index() as u32)
    }
}

impl From<NodeId> for NodeIndex<u32> {
    fn from(id: NodeId) -> Self {
        NodeIndex::new(id.0 as usize)
    }
}
