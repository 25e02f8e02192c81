//! LEB128 variable-length integer primitives.
//!
//! All multi-byte integers in the stream are unsigned LEB128: seven payload
//! bits per byte, least significant group first, high bit set on every byte
//! except the last. A `u64` occupies at most ten bytes.

use std::io::{Read, Write};

use crate::error::CodecError;

/// Writes `value` as an unsigned LEB128 varint.
pub fn write_u64<W: Write + ?Sized>(out: &mut W, mut value: u64) -> Result<(), CodecError> {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.write_all(&[byte])?;
            return Ok(());
        }
        out.write_all(&[byte | 0x80])?;
    }
}

/// Reads an unsigned LEB128 varint.
///
/// Fails with [`CodecError::VarintOverflow`] if the encoding does not fit in
/// 64 bits, and with an `UnexpectedEof` i/o error if the stream ends inside
/// the varint.
pub fn read_u64<R: Read + ?Sized>(input: &mut R) -> Result<u64, CodecError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let mut byte = [0u8; 1];
        input.read_exact(&mut byte)?;
        let bits = u64::from(byte[0] & 0x7f);
        if shift >= 64 || (shift == 63 && bits > 1) {
            return Err(CodecError::VarintOverflow);
        }
        value |= bits << shift;
        if byte[0] & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

/// Writes a collection length.
pub fn write_len<W: Write + ?Sized>(out: &mut W, len: usize) -> Result<(), CodecError> {
    write_u64(out, len as u64)
}

/// Reads a collection length, checked against the platform `usize`.
pub fn read_len<R: Read + ?Sized>(input: &mut R) -> Result<usize, CodecError> {
    let value = read_u64(input)?;
    usize::try_from(value).map_err(|_| CodecError::ValueOutOfRange { value })
}

/// Reads a varint constrained to the `u32` id space.
pub fn read_u32<R: Read + ?Sized>(input: &mut R) -> Result<u32, CodecError> {
    let value = read_u64(input)?;
    u32::try_from(value).map_err(|_| CodecError::ValueOutOfRange { value })
}
