//! Base interface tables shared by every DCOM interface
//!
//! `IUnknown` (opnums 0-2) is never called over ORPC: reference counting
//! and interface queries go through IRemUnknown. `IDispatch` (opnums 3-6)
//! is the automation base of scriptable interfaces. Both are declared so
//! derived tables start at the right opnum and calls to them are answered
//! with `E_NOTIMPL`.

use dcerpc::{Interface, InterfaceBuilder, SyntaxId};
use std::sync::Arc;

/// IUnknown syntax (00000000-0000-0000-c000-000000000046 v0.0)
pub const IUNKNOWN_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0x00000000_0000_0000_c000_000000000046, 0, 0);

/// IDispatch syntax (00020400-0000-0000-c000-000000000046 v0.0)
pub const IDISPATCH_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0x00020400_0000_0000_c000_000000000046, 0, 0);

/// Operation numbers for IUnknown
pub mod opnum {
    pub const QUERY_INTERFACE: u16 = 0;
    pub const ADD_REF: u16 = 1;
    pub const RELEASE: u16 = 2;
}

/// Operation numbers for IDispatch
pub mod dispatch_opnum {
    pub const GET_TYPE_INFO_COUNT: u16 = 3;
    pub const GET_TYPE_INFO: u16 = 4;
    pub const GET_IDS_OF_NAMES: u16 = 5;
    pub const INVOKE: u16 = 6;
}

/// The IUnknown table: three declared operations without handlers
pub fn iunknown_interface() -> Arc<Interface> {
    Arc::new(
        InterfaceBuilder::new("IUnknown", IUNKNOWN_SYNTAX)
            .declare(opnum::QUERY_INTERFACE, "QueryInterface")
            .declare(opnum::ADD_REF, "AddRef")
            .declare(opnum::RELEASE, "Release")
            .build(),
    )
}

/// The IDispatch table over IUnknown
pub fn idispatch_interface() -> Arc<Interface> {
    Arc::new(
        InterfaceBuilder::derived("IDispatch", IDISPATCH_SYNTAX, iunknown_interface())
            .declare(dispatch_opnum::GET_TYPE_INFO_COUNT, "GetTypeInfoCount")
            .declare(dispatch_opnum::GET_TYPE_INFO, "GetTypeInfo")
            .declare(dispatch_opnum::GET_IDS_OF_NAMES, "GetIDsOfNames")
            .declare(dispatch_opnum::INVOKE, "Invoke")
            .build(),
    )
}
