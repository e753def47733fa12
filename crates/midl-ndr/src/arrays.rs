//! NDR conformant arrays
//!
//! Wire format:
//! ```text
//! max_count: u32      # element count, aligned to 4
//! elements[max_count] # fixed parts of every element
//! referents...        # deferred parts of every element, in element order
//! ```
//!
//! When the array sits behind a pointer, `max_count` travels with the
//! referent (in the deferred phase of the pointer).

use crate::{NdrDecode, NdrEncode, NdrReader, NdrWriter, Result};

/// Conformant array: size determined at runtime, transmitted as prefix
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConformantArray<T>(pub Vec<T>);

impl<T> ConformantArray<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self(elements)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<Vec<T>> for ConformantArray<T> {
    fn from(elements: Vec<T>) -> Self {
        Self(elements)
    }
}

impl From<&[u8]> for ConformantArray<u8> {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<T: NdrEncode> NdrEncode for ConformantArray<T> {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        w.write_size(self.0.len())?;
        for element in &self.0 {
            element.ndr_encode(w)?;
        }
        Ok(())
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> Result<()> {
        for element in &self.0 {
            element.ndr_encode_deferred(w)?;
        }
        Ok(())
    }
}

impl<T: NdrDecode> NdrDecode for ConformantArray<T> {
    const NDR_MIN_SIZE: usize = 4;

    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
        let count = r.read_size(T::NDR_MIN_SIZE)?;
        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            elements.push(T::ndr_decode(r)?);
        }
        Ok(Self(elements))
    }

    fn ndr_decode_deferred(&mut self, r: &mut NdrReader<'_>) -> Result<()> {
        for element in &mut self.0 {
            element.ndr_decode_deferred(r)?;
        }
        Ok(())
    }
}
