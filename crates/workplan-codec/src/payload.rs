//! The delegated node payload codec.
//!
//! The plan writer and reader never interpret a node's payload; they hand it
//! to a [`NodeCodec`]. A codec's frame must be self-describing enough to
//! recover the node's variant on read, so the kind discriminant travels
//! inside the payload frame rather than as a separate field of the outer
//! record.
//!
//! [`JsonNodeCodec`] is the default implementation: the payload is encoded
//! with `serde_json::to_vec` and routed through the deduplication scope, so
//! nodes sharing one payload value serialize it once.

use std::io::{Read, Write};
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use workplan_core::NodeKind;

use crate::error::CodecError;
use crate::scope::{ReadScope, WriteScope};
use crate::varint;

const KIND_GENERIC: u64 = 0;
const KIND_TASK: u64 = 1;

/// Encodes and decodes one node's kind and payload.
///
/// Implementations must be deterministic: the same payload value always
/// produces the same frame bytes, which is what makes scope-level
/// deduplication effective.
pub trait NodeCodec {
    /// The opaque payload type carried by each node.
    type Payload;

    /// Writes the node's kind and payload as one frame.
    fn write_node<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        scope: &mut WriteScope,
        kind: NodeKind,
        payload: &Self::Payload,
    ) -> Result<(), CodecError>;

    /// Reads one frame, recovering the node's kind and payload.
    fn read_node<R: Read + ?Sized>(
        &mut self,
        input: &mut R,
        scope: &mut ReadScope,
    ) -> Result<(NodeKind, Self::Payload), CodecError>;
}

/// JSON-backed [`NodeCodec`] for any serde-serializable payload.
#[derive(Debug)]
pub struct JsonNodeCodec<P> {
    _marker: PhantomData<fn() -> P>,
}

impl<P> JsonNodeCodec<P> {
    /// Creates the codec.
    pub fn new() -> Self {
        JsonNodeCodec {
            _marker: PhantomData,
        }
    }
}

impl<P> Default for JsonNodeCodec<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> NodeCodec for JsonNodeCodec<P>
where
    P: Serialize + DeserializeOwned,
{
    type Payload = P;

    fn write_node<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        scope: &mut WriteScope,
        kind: NodeKind,
        payload: &P,
    ) -> Result<(), CodecError> {
        let tag = match kind {
            NodeKind::Generic => KIND_GENERIC,
            NodeKind::Task => KIND_TASK,
        };
        varint::write_u64(out, tag)?;
        let bytes = serde_json::to_vec(payload)?;
        scope.write_shared(out, &bytes)
    }

    fn read_node<R: Read + ?Sized>(
        &mut self,
        input: &mut R,
        scope: &mut ReadScope,
    ) -> Result<(NodeKind, P), CodecError> {
        let kind = match varint::read_u64(input)? {
            KIND_GENERIC => NodeKind::Generic,
            KIND_TASK => NodeKind::Task,
            tag => return Err(CodecError::UnknownNodeKind { tag }),
        };
        let bytes = scope.read_shared(input)?;
        let payload = serde_json::from_slice(&bytes)?;
        Ok((kind, payload))
    }
}
