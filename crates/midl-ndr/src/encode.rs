//! NDR encoding trait and the stub-data writer

use crate::{NdrContext, NdrError, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// First referent ID handed out by a writer; subsequent IDs step by 4
pub const FIRST_REFERENT_ID: u32 = 0x0002_0000;

/// Trait for types that can be encoded to NDR format
///
/// Encoding runs in two phases. `ndr_encode` writes the fixed part of the
/// value, including the referent IDs of any pointers it contains.
/// `ndr_encode_deferred` then writes the pointed-to data, in the same order
/// the pointers were written. Types without pointers only implement the
/// first phase.
pub trait NdrEncode {
    /// Write the fixed part of this value
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()>;

    /// Write the deferred referents of this value
    fn ndr_encode_deferred(&self, _w: &mut NdrWriter) -> Result<()> {
        Ok(())
    }
}

impl<T: NdrEncode + ?Sized> NdrEncode for &T {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        (**self).ndr_encode(w)
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> Result<()> {
        (**self).ndr_encode_deferred(w)
    }
}

/// Cursor over an output stub buffer
///
/// The writer appends to a single buffer. Every scalar write aligns the
/// current position to the scalar's natural size first; alignment is relative
/// to the start of the stub data.
#[derive(Debug)]
pub struct NdrWriter {
    buf: BytesMut,
    ctx: NdrContext,
    next_referent: u32,
}

impl NdrWriter {
    /// Create a writer with the default (little-endian) context
    pub fn new() -> Self {
        Self::with_context(NdrContext::new())
    }

    /// Create a writer with an explicit context
    pub fn with_context(ctx: NdrContext) -> Self {
        Self {
            buf: BytesMut::with_capacity(256),
            ctx,
            next_referent: FIRST_REFERENT_ID,
        }
    }

    /// The context this writer encodes with
    pub fn context(&self) -> &NdrContext {
        &self.ctx
    }

    /// Current byte offset from the start of the stub data
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Pad with zero bytes to the given boundary
    pub fn align(&mut self, alignment: usize) {
        let padding = NdrContext::align_padding(self.buf.len(), alignment);
        self.buf.put_bytes(0, padding);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.align(2);
        if self.ctx.little_endian {
            self.buf.put_u16_le(value);
        } else {
            self.buf.put_u16(value);
        }
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.align(4);
        if self.ctx.little_endian {
            self.buf.put_u32_le(value);
        } else {
            self.buf.put_u32(value);
        }
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.align(8);
        if self.ctx.little_endian {
            self.buf.put_u64_le(value);
        } else {
            self.buf.put_u64(value);
        }
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_u64(value as u64);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    /// Append raw bytes without alignment
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write a `[unique]`/`[ptr]` referent ID
    ///
    /// A null pointer is written as 0; a present one takes the next referent
    /// ID. The referent itself must be written later by the deferred phase.
    pub fn write_pointer(&mut self, present: bool) {
        if present {
            let id = self.next_referent;
            self.next_referent = self.next_referent.wrapping_add(4);
            self.write_u32(id);
        } else {
            self.write_u32(0);
        }
    }

    /// Write a conformance or variance count
    pub fn write_size(&mut self, count: usize) -> Result<()> {
        let count = u32::try_from(count).map_err(|_| NdrError::IntegerOverflow(count))?;
        self.write_u32(count);
        Ok(())
    }

    /// Write a 16-bit enumeration (the NDR default enum width)
    pub fn write_enum16(&mut self, value: u16) {
        self.write_u16(value);
    }

    /// Write a 32-bit `[v1_enum]` enumeration
    pub fn write_enum32(&mut self, value: u32) {
        self.write_u32(value);
    }

    /// Flush the deferred referents of a value whose fixed part was written
    pub fn write_deferred<T: NdrEncode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.ndr_encode_deferred(self)
    }

    /// Write a complete top-level parameter: fixed part, then its referents
    pub fn write<T: NdrEncode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.ndr_encode(self)?;
        self.write_deferred(value)
    }

    /// Bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing and take the stub data
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for NdrWriter {
    fn default() -> Self {
        Self::new()
    }
}
