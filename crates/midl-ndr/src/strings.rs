//! NDR string types
//!
//! `[string] wchar_t*` values are conformant varying arrays of UTF-16 code
//! units with a null terminator.
//!
//! Wire format:
//! ```text
//! max_count: u32    # Maximum elements including null
//! offset: u32       # Always 0
//! actual_count: u32 # Actual elements including null
//! units[actual_count]
//! ```
//!
//! A `BSTR` travels as a unique pointer to a `FLAGGED_WORD_BLOB`:
//! ```text
//! max_count: u32    # = clSize
//! fFlags: u32       # length in bytes
//! clSize: u32       # length in UTF-16 units
//! units[clSize]     # no terminator
//! ```

use crate::{NdrDecode, NdrEncode, NdrError, NdrReader, NdrWriter, Result, Unique};

/// Number of UTF-16 code units needed for `s`, terminator excluded
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Encode `s` as UTF-16 with a trailing null unit
pub fn encode_utf16z(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode UTF-16 units up to the first null unit
pub fn decode_utf16z(units: &[u16]) -> Result<String> {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    Ok(String::from_utf16(&units[..end])?)
}

/// Null-terminated wide string (`[string] wchar_t*` referent)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WString(pub String);

impl WString {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for WString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl NdrEncode for WString {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        let units = encode_utf16z(&self.0);
        w.write_size(units.len())?;
        w.write_u32(0);
        w.write_size(units.len())?;
        for unit in units {
            w.write_u16(unit);
        }
        Ok(())
    }
}

impl NdrDecode for WString {
    const NDR_MIN_SIZE: usize = 12;

    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
        let max_count = r.read_u32()?;
        let offset = r.read_u32()?;
        let actual_count = r.read_size(2)?;

        if offset != 0 {
            return Err(NdrError::InvalidString(format!("non-zero offset {}", offset)));
        }
        if actual_count > max_count as usize {
            return Err(NdrError::ConformanceMismatch {
                max_count,
                actual_count: actual_count as u32,
            });
        }

        let mut units = Vec::with_capacity(actual_count);
        for _ in 0..actual_count {
            units.push(r.read_u16()?);
        }
        // an empty string still carries its terminator, so actual_count is at least 1
        if units.last() != Some(&0) {
            return Err(NdrError::InvalidString("missing null terminator".to_string()));
        }
        Ok(Self(decode_utf16z(&units)?))
    }
}

/// Build a unique string pointer; an empty string becomes a null pointer
pub fn unique_wstring(s: &str) -> Unique<WString> {
    if s.is_empty() {
        Unique::null()
    } else {
        Unique::new(WString::from(s))
    }
}

impl Unique<WString> {
    /// The referenced string, or an empty string for a null pointer
    pub fn into_string(self) -> String {
        self.into_option().map(WString::into_string).unwrap_or_default()
    }

    /// Borrow the referenced string, empty for a null pointer
    pub fn as_str(&self) -> &str {
        self.as_ref().map(WString::as_str).unwrap_or("")
    }
}

/// OLE Automation string (`BSTR` / `FLAGGED_WORD_BLOB`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bstr(pub String);

impl Bstr {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Bstr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl NdrEncode for Bstr {
    fn ndr_encode(&self, w: &mut NdrWriter) -> Result<()> {
        let units: Vec<u16> = self.0.encode_utf16().collect();
        let byte_len = units
            .len()
            .checked_mul(2)
            .ok_or(NdrError::IntegerOverflow(units.len()))?;
        w.write_size(units.len())?;
        w.write_size(byte_len)?;
        w.write_size(units.len())?;
        for unit in units {
            w.write_u16(unit);
        }
        Ok(())
    }
}

impl NdrDecode for Bstr {
    const NDR_MIN_SIZE: usize = 12;

    fn ndr_decode(r: &mut NdrReader<'_>) -> Result<Self> {
        let max_count = r.read_u32()?;
        let _flags = r.read_u32()?;
        let size = r.read_size(2)?;
        if size != max_count as usize {
            return Err(NdrError::ConformanceMismatch {
                max_count,
                actual_count: size as u32,
            });
        }
        let mut units = Vec::with_capacity(size);
        for _ in 0..size {
            units.push(r.read_u16()?);
        }
        Ok(Self(String::from_utf16(&units)?))
    }
}

/// Build a `BSTR` pointer; an empty string becomes a null pointer
pub fn unique_bstr(s: &str) -> Unique<Bstr> {
    if s.is_empty() {
        Unique::null()
    } else {
        Unique::new(Bstr::from(s))
    }
}

impl Unique<Bstr> {
    /// The referenced string, or an empty string for a null `BSTR`
    pub fn into_string(self) -> String {
        self.into_option().map(Bstr::into_string).unwrap_or_default()
    }
}
