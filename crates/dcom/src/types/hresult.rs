//! HRESULT codes commonly used in DCOM

use dcerpc::StatusCode;

/// Operation successful
pub const S_OK: StatusCode = StatusCode::S_OK;
/// Operation successful, returning false
pub const S_FALSE: StatusCode = StatusCode::S_FALSE;
/// Not implemented
pub const E_NOTIMPL: StatusCode = StatusCode::E_NOTIMPL;
/// No such interface supported
pub const E_NOINTERFACE: StatusCode = StatusCode::E_NOINTERFACE;
/// Invalid pointer
pub const E_POINTER: StatusCode = StatusCode::E_POINTER;
/// Unspecified error
pub const E_FAIL: StatusCode = StatusCode::E_FAIL;
/// Access denied
pub const E_ACCESSDENIED: StatusCode = StatusCode::E_ACCESSDENIED;
/// Out of memory
pub const E_OUTOFMEMORY: StatusCode = StatusCode::E_OUTOFMEMORY;
/// Invalid argument
pub const E_INVALIDARG: StatusCode = StatusCode::E_INVALIDARG;
/// Object is not connected to the server
pub const CO_E_OBJNOTCONNECTED: StatusCode = StatusCode::new(0x8004_01FD);
