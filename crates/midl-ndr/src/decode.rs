//! NDR decoding trait and the stub-data reader

use crate::{NdrContext, NdrError, Result};
use bytes::Buf;
use std::collections::HashSet;

/// Trait for types that can be decoded from NDR format
///
/// Mirrors [`NdrEncode`](crate::NdrEncode): `ndr_decode` reads the fixed part
/// and records which pointers are present, `ndr_decode_deferred` reads the
/// referents in declaration order.
pub trait NdrDecode: Sized {
    /// Smallest number of wire bytes one value occupies.
    ///
    /// Used to bound-check element counts before allocating.
    const NDR_MIN_SIZE: usize = 1;

    /// Read the fixed part of a value
    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self>;

    /// Read the deferred referents of a value
    fn ndr_decode_deferred(&mut self, _r: &mut NdrReader<'_>) -> Result<()> {
        Ok(())
    }
}

/// Cursor over an input stub buffer
///
/// All reads are bounds-checked and fail with [`NdrError::BufferUnderflow`]
/// instead of panicking.
#[derive(Debug)]
pub struct NdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
    ctx: NdrContext,
    full_referents: HashSet<u32>,
}

impl<'a> NdrReader<'a> {
    /// Create a reader with the default (little-endian) context
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_context(buf, NdrContext::new())
    }

    /// Create a reader with an explicit context
    pub fn with_context(buf: &'a [u8], ctx: NdrContext) -> Self {
        Self {
            buf,
            pos: 0,
            ctx,
            full_referents: HashSet::new(),
        }
    }

    /// The context this reader decodes with
    pub fn context(&self) -> &NdrContext {
        &self.ctx
    }

    /// Current byte offset from the start of the stub data
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(NdrError::BufferUnderflow {
                needed: n,
                have: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Skip padding to the given boundary
    pub fn align(&mut self, alignment: usize) -> Result<()> {
        let padding = NdrContext::align_padding(self.pos, alignment);
        self.take(padding).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?.get_u8())
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.align(2)?;
        let mut b = self.take(2)?;
        Ok(if self.ctx.little_endian {
            b.get_u16_le()
        } else {
            b.get_u16()
        })
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        let mut b = self.take(4)?;
        Ok(if self.ctx.little_endian {
            b.get_u32_le()
        } else {
            b.get_u32()
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.align(8)?;
        let mut b = self.take(8)?;
        Ok(if self.ctx.little_endian {
            b.get_u64_le()
        } else {
            b.get_u64()
        })
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read raw bytes without alignment
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Read a fixed number of raw bytes into an array
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a `[unique]` referent ID, returning whether the pointer is present
    pub fn read_pointer(&mut self) -> Result<bool> {
        Ok(self.read_u32()? != 0)
    }

    /// Read a `[ptr]` referent ID
    ///
    /// Aliased full pointers are not reconstructed: a referent ID seen twice
    /// in one message is rejected.
    pub fn read_full_pointer(&mut self) -> Result<bool> {
        let id = self.read_u32()?;
        if id == 0 {
            return Ok(false);
        }
        if !self.full_referents.insert(id) {
            return Err(NdrError::InvalidPointer(id));
        }
        Ok(true)
    }

    /// Read a conformance or variance count
    ///
    /// The count is checked against the remaining input (each element needs at
    /// least `element_size` bytes) and the allocation ceiling before anything
    /// is allocated for it.
    pub fn read_size(&mut self, element_size: usize) -> Result<usize> {
        let count = self.read_u32()? as usize;
        self.check_size(count, element_size)?;
        Ok(count)
    }

    /// Bound-check a declared element count against the remaining input
    pub fn check_size(&self, count: usize, element_size: usize) -> Result<()> {
        let needed = count.saturating_mul(element_size.max(1));
        if needed > self.remaining() {
            return Err(NdrError::SizeExceedsBuffer {
                declared: count,
                remaining: self.remaining(),
            });
        }
        if needed > self.ctx.max_allocation {
            return Err(NdrError::AllocationLimitExceeded {
                requested: needed,
                limit: self.ctx.max_allocation,
            });
        }
        Ok(())
    }

    /// Read a 16-bit enumeration
    pub fn read_enum16(&mut self) -> Result<u16> {
        self.read_u16()
    }

    /// Read a 32-bit `[v1_enum]` enumeration
    pub fn read_enum32(&mut self) -> Result<u32> {
        self.read_u32()
    }

    /// Consume the deferred referents of a value whose fixed part was read
    pub fn read_deferred<T: NdrDecode>(&mut self, value: &mut T) -> Result<()> {
        value.ndr_decode_deferred(self)
    }

    /// Read a complete top-level parameter: fixed part, then its referents
    pub fn read<T: NdrDecode>(&mut self) -> Result<T> {
        let mut value = T::ndr_decode(self)?;
        self.read_deferred(&mut value)?;
        Ok(value)
    }
}
