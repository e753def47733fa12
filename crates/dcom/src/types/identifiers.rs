//! DCOM identifier types (MS-DCOM 2.2.18)

use midl_ndr::{NdrDecode, NdrEncode, NdrReader, NdrWriter, Uuid};
use std::fmt;

/// Interface Pointer Identifier (16 bytes / UUID)
///
/// Uniquely identifies an interface pointer on a specific object. Every
/// ORPC request is addressed to exactly one IPID, carried as the object
/// UUID of the call.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipid(pub Uuid);

impl Ipid {
    /// Size of IPID in bytes (16 bytes, same as UUID)
    pub const SIZE: usize = 16;

    /// Create a new IPID from a UUID
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random IPID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nil IPID
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Check if this is the nil IPID
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Get the underlying UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for Ipid {
    fn default() -> Self {
        Self::nil()
    }
}

impl From<Uuid> for Ipid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Debug for Ipid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPID({})", self.0)
    }
}

impl fmt::Display for Ipid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NdrEncode for Ipid {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        self.0.ndr_encode(w)
    }
}

impl NdrDecode for Ipid {
    const NDR_MIN_SIZE: usize = Self::SIZE;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self(Uuid::ndr_decode(r)?))
    }
}
