//! ORPC (Object RPC) header types (MS-DCOM 2.2.13, 2.2.14)
//!
//! Every DCOM request begins with an `ORPCTHIS` and every response with an
//! `ORPCTHAT`. Both may carry an array of extents (opaque, GUID-tagged
//! blobs such as error information).
//!
//! ```text
//! ORPCTHIS                       ORPC_EXTENT_ARRAY
//! +----------------------+       +--------------------------+
//! | version (5.7)        |       | size                     |
//! | flags                |       | reserved                 |
//! | reserved1            |       | extent** (unique)        |
//! | cid (causality GUID) |       +--------------------------+
//! | extensions* (unique) |       deferred: max_count = (size+1)&~1,
//! +----------------------+       one unique pointer per slot, then extents
//! ```

use midl_ndr::{
    ConformantArray, NdrDecode, NdrEncode, NdrError, NdrReader, NdrWriter, Unique, Uuid,
};

/// COM version structure (MS-DCOM 2.2.11)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ComVersion {
    /// Major version number
    pub major: u16,
    /// Minor version number
    pub minor: u16,
}

impl ComVersion {
    /// Size in bytes
    pub const SIZE: usize = 4;

    /// DCOM version 5.7 (Windows 7 and later)
    pub const DCOM_5_7: Self = Self { major: 5, minor: 7 };

    /// Create a new COM version
    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl NdrEncode for ComVersion {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write_u16(self.major);
        w.write_u16(self.minor);
        Ok(())
    }
}

impl NdrDecode for ComVersion {
    const NDR_MIN_SIZE: usize = Self::SIZE;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            major: r.read_u16()?,
            minor: r.read_u16()?,
        })
    }
}

/// ORPC extension array entry (`ORPC_EXTENT`)
///
/// A conformant structure: the padded data length travels first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrpcExtent {
    /// Extension UUID identifier
    pub id: Uuid,
    /// Extension data size (unpadded)
    pub size: u32,
    /// Extension data
    pub data: Vec<u8>,
}

impl OrpcExtent {
    pub fn new(id: Uuid, data: Vec<u8>) -> Self {
        Self {
            id,
            size: data.len() as u32,
            data,
        }
    }

    /// Data length on the wire: `size` rounded up to a multiple of 8
    pub fn padded_size(&self) -> usize {
        (self.size as usize + 7) & !7
    }
}

impl NdrEncode for OrpcExtent {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        let padded = self.padded_size();
        if self.data.len() > padded {
            return Err(NdrError::LengthMismatch {
                field: "ORPC_EXTENT.data",
                declared: self.size as usize,
                actual: self.data.len(),
            });
        }
        w.write_size(padded)?;
        self.id.ndr_encode(w)?;
        w.write_u32(self.size);
        w.write_bytes(&self.data);
        w.write_bytes(&vec![0u8; padded - self.data.len()]);
        Ok(())
    }
}

impl NdrDecode for OrpcExtent {
    const NDR_MIN_SIZE: usize = 24;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        let max_count = r.read_size(1)?;
        let id = Uuid::ndr_decode(r)?;
        let size = r.read_u32()?;
        if (size as usize + 7) & !7 != max_count {
            return Err(NdrError::ConformanceMismatch {
                max_count: max_count as u32,
                actual_count: size,
            });
        }
        let data = r.read_bytes(max_count)?[..size as usize].to_vec();
        Ok(Self { id, size, data })
    }
}

/// ORPC extent array (`ORPC_EXTENT_ARRAY`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrpcExtentArray {
    /// Number of extents
    pub size: u32,
    /// Reserved (must be 0)
    pub reserved: u32,
    extents: Unique<ConformantArray<Unique<OrpcExtent>>>,
}

impl OrpcExtentArray {
    /// Build an array; the pointer table is padded to an even slot count
    pub fn new(extents: Vec<OrpcExtent>) -> Self {
        if extents.is_empty() {
            return Self::default();
        }
        let size = extents.len() as u32;
        let mut slots: Vec<Unique<OrpcExtent>> = extents.into_iter().map(Unique::new).collect();
        slots.resize_with(((size + 1) & !1) as usize, Unique::null);
        Self {
            size,
            reserved: 0,
            extents: Unique::new(ConformantArray::new(slots)),
        }
    }

    /// Present extents in slot order
    pub fn extents(&self) -> impl Iterator<Item = &OrpcExtent> {
        self.extents
            .as_ref()
            .into_iter()
            .flat_map(|array| array.0.iter())
            .filter_map(Unique::as_ref)
    }

    /// First extent tagged with `id`
    pub fn find(&self, id: &Uuid) -> Option<&OrpcExtent> {
        self.extents().find(|extent| extent.id == *id)
    }
}

impl NdrEncode for OrpcExtentArray {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write_u32(self.size);
        w.write_u32(self.reserved);
        self.extents.ndr_encode(w)
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        self.extents.ndr_encode_deferred(w)
    }
}

impl NdrDecode for OrpcExtentArray {
    const NDR_MIN_SIZE: usize = 12;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            size: r.read_u32()?,
            reserved: r.read_u32()?,
            extents: Unique::ndr_decode(r)?,
        })
    }

    fn ndr_decode_deferred(&mut self, r: &mut NdrReader<'_>) -> midl_ndr::Result<()> {
        self.extents.ndr_decode_deferred(r)?;
        if let Some(array) = self.extents.as_ref() {
            let expected = ((self.size as usize) + 1) & !1;
            if array.len() != expected {
                return Err(NdrError::ConformanceMismatch {
                    max_count: array.len() as u32,
                    actual_count: expected as u32,
                });
            }
        }
        Ok(())
    }
}

/// ORPCTHIS structure (MS-DCOM 2.2.13)
///
/// Sent with every ORPC request from client to server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrpcThis {
    /// COM version
    pub version: ComVersion,
    /// Flags (must be 0)
    pub flags: u32,
    /// Reserved (must be 0)
    pub reserved1: u32,
    /// Causality ID (UUID identifying the call chain)
    pub causality_id: Uuid,
    /// Optional extension array
    pub extensions: Unique<OrpcExtentArray>,
}

impl OrpcThis {
    /// Create a new ORPCTHIS with a fresh causality ID
    pub fn new() -> Self {
        Self::with_causality(Uuid::new_v4())
    }

    /// Create with a specific causality ID
    pub fn with_causality(causality_id: Uuid) -> Self {
        Self {
            version: ComVersion::DCOM_5_7,
            flags: 0,
            reserved1: 0,
            causality_id,
            extensions: Unique::null(),
        }
    }

    pub fn with_extensions(mut self, extensions: OrpcExtentArray) -> Self {
        self.extensions = Unique::new(extensions);
        self
    }
}

impl Default for OrpcThis {
    fn default() -> Self {
        Self::new()
    }
}

impl NdrEncode for OrpcThis {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        self.version.ndr_encode(w)?;
        w.write_u32(self.flags);
        w.write_u32(self.reserved1);
        self.causality_id.ndr_encode(w)?;
        self.extensions.ndr_encode(w)
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        self.extensions.ndr_encode_deferred(w)
    }
}

impl NdrDecode for OrpcThis {
    const NDR_MIN_SIZE: usize = 32;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            version: ComVersion::ndr_decode(r)?,
            flags: r.read_u32()?,
            reserved1: r.read_u32()?,
            causality_id: Uuid::ndr_decode(r)?,
            extensions: Unique::ndr_decode(r)?,
        })
    }

    fn ndr_decode_deferred(&mut self, r: &mut NdrReader<'_>) -> midl_ndr::Result<()> {
        self.extensions.ndr_decode_deferred(r)
    }
}

/// ORPCTHAT structure (MS-DCOM 2.2.14)
///
/// Sent with every ORPC response from server to client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrpcThat {
    /// Flags (must be 0)
    pub flags: u32,
    /// Optional extension array
    pub extensions: Unique<OrpcExtentArray>,
}

impl OrpcThat {
    /// Create a new empty ORPCTHAT
    pub fn new() -> Self {
        Self::default()
    }
}

impl NdrEncode for OrpcThat {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write_u32(self.flags);
        self.extensions.ndr_encode(w)
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        self.extensions.ndr_encode_deferred(w)
    }
}

impl NdrDecode for OrpcThat {
    const NDR_MIN_SIZE: usize = 8;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            flags: r.read_u32()?,
            extensions: Unique::ndr_decode(r)?,
        })
    }

    fn ndr_decode_deferred(&mut self, r: &mut NdrReader<'_>) -> midl_ndr::Result<()> {
        self.extensions.ndr_decode_deferred(r)
    }
}
