//! Core DCOM types (MS-DCOM 2.2)
//!
//! - Identifiers: IPID
//! - ORPC headers: ORPCTHIS, ORPCTHAT and their extent arrays
//! - HRESULT constants

pub mod hresult;
mod identifiers;
mod orpc;

pub use identifiers::Ipid;
pub use orpc::*;

/// Well-known interface UUIDs
pub mod iid {
    /// IUnknown interface UUID
    pub const IUNKNOWN: &str = "00000000-0000-0000-c000-000000000046";
    /// IDispatch interface UUID
    pub const IDISPATCH: &str = "00020400-0000-0000-c000-000000000046";
}
