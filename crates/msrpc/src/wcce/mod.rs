//! Windows Client Certificate Enrollment (MS-WCCE)
//!
//! ICertRequestD and ICertRequestD2 are DCOM interfaces: every request
//! starts with `ORPCTHIS`, every response with `ORPCTHAT`, and calls are
//! addressed by IPID.
//!
//! ```text
//! IUnknown          0..3
//! ICertRequestD     3..6   Request, GetCACert, Ping
//! ICertRequestD2    6..10  Request2, GetCAProperty, GetCAPropertyInfo, Ping2
//! ```
//!
//! [`CertTransBlob`] is shared with ICertPassage (MS-ICPR).

pub mod certrequest;
pub mod certrequest2;

use midl_ndr::{
    decode_utf16z, encode_utf16z, ConformantArray, NdrDecode, NdrEncode, NdrError, NdrReader,
    NdrWriter, Unique,
};

/// Longest authority name or attribute string, in UTF-16 units
pub const MAX_AUTHORITY_LEN: usize = 1536;
/// Longest serial number accepted by Request2, in UTF-16 units
pub const MAX_SERIAL_NUMBER_LEN: usize = 64;

/// Types of CA property values
pub mod proptype {
    pub const LONG: i32 = 1;
    pub const DATE: i32 = 2;
    pub const BINARY: i32 = 3;
    pub const STRING: i32 = 4;
}

/// CA property identifiers used with GetCAProperty
pub mod prop {
    pub const FILEVERSION: i32 = 1;
    pub const PRODUCTVERSION: i32 = 2;
    pub const EXITCOUNT: i32 = 3;
    pub const EXITDESCRIPTION: i32 = 4;
    pub const POLICYDESCRIPTION: i32 = 5;
    pub const CANAME: i32 = 6;
    pub const SANITIZEDCANAME: i32 = 7;
    pub const SHAREDFOLDER: i32 = 8;
    pub const PARENTCA: i32 = 9;
    pub const CATYPE: i32 = 10;
    pub const CASIGCERTCOUNT: i32 = 11;
    pub const CASIGCERT: i32 = 12;
}

/// Request disposition values
pub mod disposition {
    pub const INCOMPLETE: u32 = 0;
    pub const ERROR: u32 = 1;
    pub const DENIED: u32 = 2;
    pub const ISSUED: u32 = 3;
    pub const ISSUED_OUT_OF_BAND: u32 = 4;
    pub const UNDER_SUBMISSION: u32 = 5;
    pub const REVOKED: u32 = 6;
}

/// `CERTTRANSBLOB`: a byte count followed by a unique pointer to the bytes
///
/// ```text
/// cb: u32
/// pb: unique pointer ──► max_count: u32, bytes[max_count]
/// ```
///
/// An empty blob travels as `cb = 0` and a null pointer. Decoding rejects a
/// blob whose `cb` differs from the element count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertTransBlob {
    /// Byte count as declared on the wire; equal to the data length once decoded
    cb: u32,
    data: Unique<ConformantArray<u8>>,
}

impl CertTransBlob {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        if data.is_empty() {
            return Self::default();
        }
        Self {
            cb: data.len() as u32,
            data: Unique::new(ConformantArray::new(data)),
        }
    }

    /// A null-terminated UTF-16LE string, as used for attributes and messages
    pub fn from_string(s: &str) -> Self {
        Self::new(
            encode_utf16z(s)
                .into_iter()
                .flat_map(u16::to_le_bytes)
                .collect::<Vec<u8>>(),
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref().map_or(&[][..], |array| array.0.as_slice())
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_option().map(ConformantArray::into_inner).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Interpret the bytes as a UTF-16LE string up to the first null unit
    pub fn to_utf16_string(&self) -> midl_ndr::Result<String> {
        let bytes = self.as_bytes();
        if bytes.len() % 2 != 0 {
            return Err(NdrError::InvalidString(format!(
                "odd byte count {} for a UTF-16 string",
                bytes.len()
            )));
        }
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        decode_utf16z(&units)
    }

    /// A 32-bit little-endian value, as used for PROPTYPE_LONG properties
    pub fn from_long(value: i32) -> Self {
        Self::new(value.to_le_bytes().to_vec())
    }

    pub fn to_long(&self) -> Option<i32> {
        let bytes: [u8; 4] = self.as_bytes().try_into().ok()?;
        Some(i32::from_le_bytes(bytes))
    }
}

impl From<Vec<u8>> for CertTransBlob {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for CertTransBlob {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl NdrEncode for CertTransBlob {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        let len = self.as_bytes().len();
        let cb = u32::try_from(len).map_err(|_| NdrError::IntegerOverflow(len))?;
        w.write_u32(cb);
        self.data.ndr_encode(w)
    }

    fn ndr_encode_deferred(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        self.data.ndr_encode_deferred(w)
    }
}

impl NdrDecode for CertTransBlob {
    const NDR_MIN_SIZE: usize = 8;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            cb: r.read_u32()?,
            data: Unique::ndr_decode(r)?,
        })
    }

    fn ndr_decode_deferred(&mut self, r: &mut NdrReader<'_>) -> midl_ndr::Result<()> {
        self.data.ndr_decode_deferred(r)?;
        let actual = self.as_bytes().len();
        if self.cb as usize != actual {
            return Err(NdrError::LengthMismatch {
                field: "cb",
                declared: self.cb as usize,
                actual,
            });
        }
        Ok(())
    }
}
