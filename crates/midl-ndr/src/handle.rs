//! NDR context handles
//!
//! A context handle is a 20-byte token minted by the server:
//! ```text
//! attributes: u32
//! uuid: GUID
//! ```
//! Distinct handle kinds are declared with [`context_handle!`](crate::context_handle)
//! so that, say, a remote-object handle cannot be passed where a channel
//! handle is expected.

use crate::{NdrDecode, NdrEncode, NdrReader, NdrWriter, Result};
use uuid::Uuid;

/// Raw context handle (`ndr_context_handle`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContextHandle {
    pub attributes: u32,
    pub uuid: Uuid,
}

impl ContextHandle {
    /// Size in bytes
    pub const SIZE: usize = 20;

    pub fn new(attributes: u32, uuid: Uuid) -> Self {
        Self { attributes, uuid }
    }

    /// Mint a fresh handle with a random v4 UUID
    pub fn generate() -> Self {
        Self::new(0, Uuid::new_v4())
    }

    /// The all-zero handle a server returns once the resource is gone
    pub fn nil() -> Self {
        Self::default()
    }

    pub fn is_nil(&self) -> bool {
        self.attributes == 0 && self.uuid.is_nil()
    }
}

impl NdrEncode for ContextHandle {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        w.write_u32(self.attributes);
        self.uuid.ndr_encode(w)
    }
}

impl NdrDecode for ContextHandle {
    const NDR_MIN_SIZE: usize = ContextHandle::SIZE;

    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
        Ok(Self {
            attributes: r.read_u32()?,
            uuid: Uuid::ndr_decode(r)?,
        })
    }
}

/// Declare a context-handle newtype with the NDR codec of [`ContextHandle`]
///
/// ```
/// midl_ndr::context_handle! {
///     /// Handle to a print queue
///     pub struct QueueHandle;
/// }
///
/// let handle = QueueHandle::generate();
/// assert!(!handle.is_nil());
/// ```
#[macro_export]
macro_rules! context_handle {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name(pub $crate::ContextHandle);

        impl $name {
            pub fn generate() -> Self {
                Self($crate::ContextHandle::generate())
            }

            pub fn nil() -> Self {
                Self($crate::ContextHandle::nil())
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            pub fn handle(&self) -> &$crate::ContextHandle {
                &self.0
            }
        }

        impl From<$crate::ContextHandle> for $name {
            fn from(handle: $crate::ContextHandle) -> Self {
                Self(handle)
            }
        }

        impl $crate::NdrEncode for $name {
            fn ndr_encode(&self, w: &mut $crate::NdrWriter) -> $crate::Result<()> {
                $crate::NdrEncode::ndr_encode(&self.0, w)
            }
        }

        impl $crate::NdrDecode for $name {
            const NDR_MIN_SIZE: usize = $crate::ContextHandle::SIZE;

            fn ndr_decode(r: &mut $crate::NdrReader<'_>) -> $crate::Result<Self> {
                <$crate::ContextHandle as $crate::NdrDecode>::ndr_decode(r).map(Self)
            }
        }
    };
}
