//! NDR (Network Data Representation) runtime library
//!
//! This crate implements the NDR20 transfer syntax used by MS-RPC and DCOM
//! stubs: a cursor writer and reader plus the two-phase encode/decode traits
//! that reproduce the Microsoft pointer and alignment rules.
//!
//! # NDR Wire Format
//!
//! - Primitives align to their natural size (1, 2, 4, or 8 bytes)
//! - `[unique]` and `[ptr]` pointers occupy a 4-byte referent ID (0 = null)
//! - Top-level `[ref]` pointers have no wire representation
//! - Pointed-to data is *deferred*: it is written after the fixed part of the
//!   enclosing record, in pointer-declaration order
//! - Conformant arrays carry their element count (`max_count`) before the elements
//! - Strings are conformant varying arrays with a null terminator
//!
//! # Two-phase encoding
//!
//! Every wire type implements [`NdrEncode`] / [`NdrDecode`] with a *fixed*
//! phase (`ndr_encode` / `ndr_decode`) and a *deferred* phase
//! (`ndr_encode_deferred` / `ndr_decode_deferred`). A record calls the fixed
//! phase of each field in order, then the deferred phase of each field in the
//! same order. [`NdrWriter::write`] and [`NdrReader::read`] run both phases for
//! a top-level parameter.
//!
//! ```
//! use midl_ndr::{unique_wstring, NdrReader, NdrWriter, Unique, WString};
//!
//! let mut w = NdrWriter::new();
//! w.write(&unique_wstring("CA01")).unwrap();
//! let bytes = w.into_bytes();
//!
//! let mut r = NdrReader::new(&bytes);
//! let name: Unique<WString> = r.read().unwrap();
//! assert_eq!(name.into_string(), "CA01");
//! ```

mod arrays;
mod context;
mod decode;
mod encode;
mod enums;
mod error;
mod handle;
mod pointers;
mod primitives;
mod strings;

pub use arrays::ConformantArray;
pub use context::{NdrContext, MAX_NDR_ALLOCATION_SIZE};
pub use decode::{NdrDecode, NdrReader};
pub use encode::{NdrEncode, NdrWriter, FIRST_REFERENT_ID};
pub use error::{NdrError, Result};
pub use handle::ContextHandle;
pub use pointers::{Full, Unique};
pub use strings::{decode_utf16z, encode_utf16z, unique_bstr, unique_wstring, utf16_len, Bstr, WString};

/// Re-export bytes for convenience
pub use bytes::{Buf, BufMut, Bytes, BytesMut};
/// GUIDs on the wire are `uuid::Uuid` values
pub use uuid::Uuid;
