//! Status codes and their human-readable translation
//!
//! Every operation response ends in a 32-bit status (an HRESULT or Win32
//! code). [`StatusCode`] wraps the raw value; the translator table maps known
//! codes to a symbolic name and message for diagnostics.

use crate::dcerpc::FaultStatus;
use midl_ndr::{NdrDecode, NdrEncode, NdrReader, NdrWriter};
use std::fmt;

/// A 32-bit status (HRESULT or Win32 error) as returned on the wire
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const S_OK: Self = Self(0);
    pub const S_FALSE: Self = Self(1);
    pub const E_NOTIMPL: Self = Self(0x8000_4001);
    pub const E_NOINTERFACE: Self = Self(0x8000_4002);
    pub const E_POINTER: Self = Self(0x8000_4003);
    pub const E_FAIL: Self = Self(0x8000_4005);
    pub const E_UNEXPECTED: Self = Self(0x8000_FFFF);
    pub const E_ACCESSDENIED: Self = Self(0x8007_0005);
    pub const E_HANDLE: Self = Self(0x8007_0006);
    pub const E_OUTOFMEMORY: Self = Self(0x8007_000E);
    pub const E_INVALIDARG: Self = Self(0x8007_0057);

    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn from_i32(code: i32) -> Self {
        Self(code as u32)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }

    /// Zero means success; every non-zero return is reported as an error
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Symbolic name of a known code
    pub fn name(self) -> Option<&'static str> {
        lookup(self).map(|entry| entry.name)
    }

    /// Message text of a known code
    pub fn message(self) -> Option<&'static str> {
        lookup(self).map(|entry| entry.message)
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        Self::from_i32(code)
    }
}

impl From<FaultStatus> for StatusCode {
    fn from(status: FaultStatus) -> Self {
        Self(status as u32)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match lookup(*self) {
            Some(entry) => write!(f, "{} (0x{:08x}): {}", entry.name, self.0, entry.message),
            None => write!(f, "0x{:08x}", self.0),
        }
    }
}

impl fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "StatusCode({})", name),
            None => write!(f, "StatusCode(0x{:08x})", self.0),
        }
    }
}

impl NdrEncode for StatusCode {
    fn ndr_encode(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write_u32(self.0);
        Ok(())
    }
}

impl NdrDecode for StatusCode {
    const NDR_MIN_SIZE: usize = 4;

    fn ndr_decode(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self(r.read_u32()?))
    }
}

struct StatusEntry {
    code: u32,
    name: &'static str,
    message: &'static str,
}

const fn entry(code: u32, name: &'static str, message: &'static str) -> StatusEntry {
    StatusEntry {
        code,
        name,
        message,
    }
}

// Sorted by code for binary search
static KNOWN_STATUS: &[StatusEntry] = &[
    entry(0x0000_0000, "S_OK", "The operation completed successfully."),
    entry(0x0000_0001, "S_FALSE", "The operation completed with a false result."),
    entry(0x0000_0005, "ERROR_ACCESS_DENIED", "Access is denied."),
    entry(0x0000_06f7, "RPC_X_BAD_STUB_DATA", "The stub received bad data."),
    entry(0x1c00_0000, "nca_s_fault_other", "The call failed on the server."),
    entry(0x1c00_001a, "nca_s_fault_context_mismatch", "The presentation context does not match."),
    entry(0x1c01_0002, "nca_s_op_rng_error", "The operation number is out of range for the interface."),
    entry(0x1c01_0003, "nca_s_unk_if", "The server does not export the requested interface."),
    entry(0x8000_4001, "E_NOTIMPL", "Not implemented."),
    entry(0x8000_4002, "E_NOINTERFACE", "No such interface supported."),
    entry(0x8000_4003, "E_POINTER", "Invalid pointer."),
    entry(0x8000_4005, "E_FAIL", "Unspecified error."),
    entry(0x8000_FFFF, "E_UNEXPECTED", "Catastrophic failure."),
    entry(0x8004_0008, "E_NOTIFICATION_CHANNEL_CLOSED", "The notification channel has been closed."),
    entry(0x8004_000C, "E_CALL_OUTSTANDING", "A blocking call is already outstanding on this handle."),
    entry(0x8004_0012, "E_RESPONSE_TOO_LARGE", "The notification response exceeds the size limit."),
    entry(0x8004_0014, "E_NOTIFICATION_TYPE_MISMATCH", "The notification type does not match the channel."),
    entry(0x8004_01FD, "CO_E_OBJNOTCONNECTED", "The object is not connected to the server."),
    entry(0x8007_0005, "E_ACCESSDENIED", "General access denied error."),
    entry(0x8007_0006, "E_HANDLE", "Invalid handle."),
    entry(0x8007_000E, "E_OUTOFMEMORY", "Ran out of memory."),
    entry(0x8007_0015, "E_REGISTRATION_LIMIT", "The server cannot accept more notification registrations."),
    entry(0x8007_0057, "E_INVALIDARG", "One or more arguments are invalid."),
    entry(0x8007_007B, "E_INVALID_NAME", "The filename, directory name, or volume label syntax is incorrect."),
    entry(0x8007_071A, "E_NOTIFICATIONS_TERMINATED", "The notification registration was terminated."),
    entry(0x8009_4001, "CERTSRV_E_BAD_REQUESTSUBJECT", "The request subject name is invalid or too long."),
    entry(0x8009_4004, "CERTSRV_E_PROPERTY_EMPTY", "The requested property value is empty."),
    entry(0x8009_4800, "CERTSRV_E_UNSUPPORTED_CERT_TYPE", "The requested certificate template is not supported."),
];

fn lookup(code: StatusCode) -> Option<&'static StatusEntry> {
    KNOWN_STATUS
        .binary_search_by_key(&code.0, |entry| entry.code)
        .ok()
        .map(|index| &KNOWN_STATUS[index])
}
