//! Core DCE RPC identifiers
//!
//! An interface is named on the wire by its abstract syntax: a UUID plus a
//! `major.minor` version. Stub data is always NDR20.

use midl_ndr::NdrContext;
use std::fmt;
use uuid::Uuid;

/// NDR transfer syntax UUID
pub const NDR_SYNTAX_UUID: &str = "8a885d04-1ceb-11c9-9fe8-08002b104860";
/// NDR transfer syntax version
pub const NDR_SYNTAX_VERSION: u32 = 2;

/// Syntax identifier (interface UUID + version)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntaxId {
    pub uuid: Uuid,
    pub major: u16,
    pub minor: u16,
}

impl SyntaxId {
    pub const fn new(uuid: Uuid, major: u16, minor: u16) -> Self {
        Self { uuid, major, minor }
    }

    /// Build a syntax from a UUID written as a `u128` literal
    pub const fn from_u128(uuid: u128, major: u16, minor: u16) -> Self {
        Self::new(Uuid::from_u128(uuid), major, minor)
    }

    pub fn parse(uuid: &str, major: u16, minor: u16) -> Option<Self> {
        Uuid::parse_str(uuid)
            .ok()
            .map(|uuid| Self::new(uuid, major, minor))
    }

    /// Packed version as carried in a presentation context: minor << 16 | major
    pub fn version(&self) -> u32 {
        ((self.minor as u32) << 16) | self.major as u32
    }

    /// Whether a server offering `self` can serve a client asking for `requested`
    ///
    /// Majors must be equal and the server minor must be at least the
    /// requested minor.
    pub fn accepts(&self, requested: &SyntaxId) -> bool {
        self.uuid == requested.uuid && self.major == requested.major && self.minor >= requested.minor
    }
}

impl fmt::Display for SyntaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}.{}", self.uuid, self.major, self.minor)
    }
}

/// The NDR20 transfer syntax
pub fn ndr_syntax() -> SyntaxId {
    SyntaxId::from_u128(0x8a885d04_1ceb_11c9_9fe8_08002b104860, NDR_SYNTAX_VERSION as u16, 0)
}

/// Integer representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntRep {
    BigEndian = 0,
    #[default]
    LittleEndian = 1,
}

/// Data representation negotiated for a presentation context
///
/// Only the integer representation varies in practice; characters are
/// ASCII/UTF-16 and floats IEEE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataRepresentation {
    pub int_rep: IntRep,
}

impl DataRepresentation {
    /// Little-endian NDR
    pub fn ndr() -> Self {
        Self {
            int_rep: IntRep::LittleEndian,
        }
    }

    pub fn big_endian() -> Self {
        Self {
            int_rep: IntRep::BigEndian,
        }
    }

    pub fn is_little_endian(&self) -> bool {
        self.int_rep == IntRep::LittleEndian
    }

    /// Codec context for stub data in this representation
    pub fn ndr_context(&self) -> NdrContext {
        NdrContext::with_byte_order(self.is_little_endian())
    }
}

/// Fault status codes reported when a call cannot produce a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum FaultStatus {
    /// Operation number out of range for the interface
    OpRngError = 0x1c010002,
    /// Unknown interface
    UnkIf = 0x1c010003,
    /// General RPC error
    RpcError = 0x1c000000,
    /// Stub data could not be unmarshalled
    BadStubData = 0x000006f7,
    /// Access denied
    AccessDenied = 0x00000005,
    /// Context mismatch
    ContextMismatch = 0x1c00001a,
    /// Operation declared but not implemented
    NotImplemented = 0x80004001,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_version_packing() {
        let syntax = SyntaxId::from_u128(0x0b6edbfa_4a24_4fc6_8a23_942b1eca65d1, 1, 2);
        assert_eq!(syntax.version(), 0x0002_0001);
        assert_eq!(
            syntax.to_string(),
            "0b6edbfa-4a24-4fc6-8a23-942b1eca65d1 v1.2"
        );
    }

    #[test]
    fn test_syntax_acceptance() {
        let offered = SyntaxId::from_u128(1, 1, 2);
        assert!(offered.accepts(&SyntaxId::from_u128(1, 1, 0)));
        assert!(offered.accepts(&SyntaxId::from_u128(1, 1, 2)));
        assert!(!offered.accepts(&SyntaxId::from_u128(1, 1, 3)));
        assert!(!offered.accepts(&SyntaxId::from_u128(1, 0, 2)));
        assert!(!offered.accepts(&SyntaxId::from_u128(2, 1, 2)));
    }

    #[test]
    fn test_ndr_syntax_matches_constant() {
        assert_eq!(ndr_syntax().uuid.to_string(), NDR_SYNTAX_UUID);
    }

    #[test]
    fn test_data_representation_context() {
        assert!(DataRepresentation::default().ndr_context().little_endian);
        assert!(!DataRepresentation::big_endian().ndr_context().little_endian);
    }
}
