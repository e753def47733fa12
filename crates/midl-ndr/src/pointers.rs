//! NDR pointer types
//!
//! NDR supports three pointer semantics:
//!
//! - Reference (`[ref]`): Non-null, no wire representation at the top level;
//!   a `[ref]` parameter is written as its referent directly
//! - Unique (`[unique]`): Nullable, 4-byte referent ID, no aliasing
//! - Full (`[ptr]`): Nullable, 4-byte referent ID, aliasing allowed
//!
//! The referent ID is part of the fixed phase; the pointed-to value is
//! written in the deferred phase.

use crate::{NdrDecode, NdrEncode, NdrReader, NdrWriter, Result};

/// Unique pointer - nullable, no aliasing
///
/// Encoded as:
/// - 4-byte referent ID (0 = null, non-zero = valid)
/// - If non-null, pointee data follows in the deferred phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unique<T> {
    value: Option<T>,
    pending: bool,
}

impl<T> Unique<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Some(value),
            pending: false,
        }
    }

    pub fn null() -> Self {
        Self {
            value: None,
            pending: false,
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none() && !self.pending
    }

    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for Unique<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Option<T>> for Unique<T> {
    fn from(value: Option<T>) -> Self {
        Self {
            value,
            pending: false,
        }
    }
}

impl<T: NdrEncode> NdrEncode for Unique<T> {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        w.write_pointer(self.value.is_some());
        Ok(())
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> Result<()> {
        match &self.value {
            Some(value) => w.write(value),
            None => Ok(()),
        }
    }
}

impl<T: NdrDecode> NdrDecode for Unique<T> {
    const NDR_MIN_SIZE: usize = 4;

    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
        let pending = r.read_pointer()?;
        Ok(Self {
            value: None,
            pending,
        })
    }

    fn ndr_decode_deferred(&mut self, r: &mut NdrReader<'_>) -> Result<()> {
        if self.pending {
            self.value = Some(r.read()?);
            self.pending = false;
        }
        Ok(())
    }
}

/// Full pointer - nullable, aliasing allowed on the wire
///
/// Written exactly like a unique pointer. Every pointer this crate writes
/// gets a fresh referent ID; when decoding, a repeated ID is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Full<T>(Unique<T>);

impl<T> Full<T> {
    pub fn new(value: T) -> Self {
        Self(Unique::new(value))
    }

    pub fn null() -> Self {
        Self(Unique::null())
    }

    pub fn as_ref(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.0.into_option()
    }
}

impl<T> Default for Full<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: NdrEncode> NdrEncode for Full<T> {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        self.0.ndr_encode(w)
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> Result<()> {
        self.0.ndr_encode_deferred(w)
    }
}

impl<T: NdrDecode> NdrDecode for Full<T> {
    const NDR_MIN_SIZE: usize = 4;

    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
        let pending = r.read_full_pointer()?;
        Ok(Self(Unique {
            value: None,
            pending,
        }))
    }

    fn ndr_decode_deferred(&mut self, r: &mut NdrReader<'_>) -> Result<()> {
        self.0.ndr_decode_deferred(r)
    }
}
