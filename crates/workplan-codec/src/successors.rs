//! Edge-set codec shared by the writer and reader.
//!
//! An edge set is serialized as a length-prefixed sequence of stream ids.
//! Iteration order of the set is not part of the contract; only membership
//! round-trips.

use std::collections::HashMap;
use std::io::{Read, Write};

use workplan_core::NodeId;

use crate::error::CodecError;
use crate::varint;

/// Writes one edge set: size, then each member's already-assigned stream id.
pub(crate) fn write_successors<W: Write + ?Sized>(
    out: &mut W,
    ids: &HashMap<NodeId, u32>,
    successors: impl Iterator<Item = NodeId>,
) -> Result<(), CodecError> {
    let members = successors
        .map(|succ| {
            ids.get(&succ)
                .copied()
                .ok_or(CodecError::UnassignedSuccessor { id: succ })
        })
        .collect::<Result<Vec<u32>, CodecError>>()?;
    varint::write_len(out, members.len())?;
    for id in members {
        varint::write_u64(out, u64::from(id))?;
    }
    Ok(())
}

/// Reads one edge set, resolving each stream id against the nodes read so
/// far and invoking `attach` for each resolved successor in stream order.
pub(crate) fn read_successors<R: Read + ?Sized>(
    input: &mut R,
    table: &HashMap<u32, NodeId>,
    mut attach: impl FnMut(NodeId) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    let count = varint::read_len(input)?;
    for _ in 0..count {
        let id = varint::read_u32(input)?;
        let successor = table
            .get(&id)
            .copied()
            .ok_or(CodecError::UnknownSuccessor { id })?;
        attach(successor)?;
    }
    Ok(())
}
