//! Codec error types for workplan-codec.
//!
//! [`CodecError`] covers all anticipated failure modes of the binary
//! protocol: transport errors, payload serialization, stream corruption
//! variants, and structural invariant violations surfaced while
//! reconstructing a graph. All failures abort the in-progress write or read;
//! there is no partial result to recover.

use std::io;

use thiserror::Error;
use workplan_core::{CoreError, NodeId};

/// Errors produced by plan serialization and deserialization.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying byte stream failed, including truncation
    /// (`UnexpectedEof`) while a record was being read.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Payload serialization or deserialization failed.
    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A structural invariant was violated while reconstructing the graph,
    /// e.g. a must-run or finalizing successor resolved to a non-task node.
    #[error("structural invariant violated: {0}")]
    Invariant(#[from] CoreError),

    /// The reachable subgraph contains a true cycle, so no successors-first
    /// write order exists. Serialization requires an acyclic plan.
    #[error("cycle detected through NodeId({id})", id = id.0)]
    Cycle { id: NodeId },

    /// A varint did not fit in 64 bits.
    #[error("varint exceeds 64 bits")]
    VarintOverflow,

    /// A decoded integer did not fit its field.
    #[error("value out of range: {value}")]
    ValueOutOfRange { value: u64 },

    /// An edge set referenced a stream id that no already-read node carries.
    /// By the write-order invariant every successor precedes its referencing
    /// node, so this indicates a corrupt stream.
    #[error("unknown successor id: {id}")]
    UnknownSuccessor { id: u32 },

    /// Two node records carried the same stream id.
    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: u32 },

    /// A payload frame declared a node kind this codec does not know.
    #[error("unknown node kind tag: {tag}")]
    UnknownNodeKind { tag: u64 },

    /// A shared-value frame carried an unrecognized tag byte.
    #[error("unknown shared value frame tag: {tag}")]
    UnknownFrameTag { tag: u64 },

    /// A shared-value back-reference pointed past the values decoded so far.
    #[error("shared value back-reference out of range: {index}")]
    UnknownSharedValue { index: u32 },

    /// A successor was reached during encoding without ever being assigned a
    /// stream id. Internal inconsistency between the topological order and
    /// the edge sets.
    #[error("successor NodeId({id}) has no assigned stream id", id = id.0)]
    UnassignedSuccessor { id: NodeId },
}
