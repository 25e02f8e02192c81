//! Per-operation deduplication scope for shared payload values.
//!
//! Payload sub-objects referenced from multiple nodes should be encoded once
//! and resolved to the same bytes on every later reference. The write side
//! interns encoded frames by blake3 content hash; the read side keeps the
//! mirror table of frames decoded so far, indexed in stream order.
//!
//! A scope is an explicit context object owned by a single write or read
//! call. It is never reused across operations and is not thread-safe.
//!
//! # Frame layout
//!
//! ```text
//! Shared := 0:varint  Len:varint  Bytes{Len}     first occurrence
//!         | 1:varint  Index:varint               back-reference
//! ```

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use crate::error::CodecError;
use crate::varint;

const FRAME_INLINE: u64 = 0;
const FRAME_BACKREF: u64 = 1;

/// Write-side interning table: content hash of an already-written frame to
/// its index in first-written order.
#[derive(Debug, Default)]
pub struct WriteScope {
    interned: HashMap<blake3::Hash, u32>,
}

impl WriteScope {
    /// Creates an empty scope for one write operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `bytes` as a shared-value frame: the full content on first
    /// occurrence, a back-reference on every repeat.
    pub fn write_shared<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        bytes: &[u8],
    ) -> Result<(), CodecError> {
        let hash = blake3::hash(bytes);
        if let Some(&index) = self.interned.get(&hash) {
            varint::write_u64(out, FRAME_BACKREF)?;
            varint::write_u64(out, u64::from(index))?;
            return Ok(());
        }
        let index = self.interned.len() as u32;
        self.interned.insert(hash, index);
        varint::write_u64(out, FRAME_INLINE)?;
        varint::write_len(out, bytes.len())?;
        out.write_all(bytes)?;
        Ok(())
    }
}

/// Read-side table of shared values in first-decoded order.
#[derive(Debug, Default)]
pub struct ReadScope {
    values: Vec<Arc<[u8]>>,
}

impl ReadScope {
    /// Creates an empty scope for one read operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one shared-value frame, returning the same shared bytes for
    /// every back-reference to a previously decoded frame.
    pub fn read_shared<R: Read + ?Sized>(
        &mut self,
        input: &mut R,
    ) -> Result<Arc<[u8]>, CodecError> {
        let tag = varint::read_u64(input)?;
        match tag {
            FRAME_INLINE => {
                let len = varint::read_len(input)?;
                let mut bytes = vec![0u8; len];
                input.read_exact(&mut bytes)?;
                let value: Arc<[u8]> = bytes.into();
                self.values.push(Arc::clone(&value));
                Ok(value)
            }
            FRAME_BACKREF => {
                let index = varint::read_u32(input)?;
                self.values
                    .get(index as usize)
                    .cloned()
                    .ok_or(CodecError::UnknownSharedValue { index })
            }
            tag => Err(CodecError::UnknownFrameTag { tag }),
        }
    }
}
