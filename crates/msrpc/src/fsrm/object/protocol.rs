//! IFsrmObject wire protocol
//!
//! Every operation is a property getter, a property setter or an action, so
//! the generic ORPC envelopes carry them all.

use dcerpc::SyntaxId;
use dcom::{OrpcRequest, OrpcResponse, PropertyRequest, PropertyResponse};
use midl_ndr::{Bstr, Unique, Uuid};

/// IFsrmObject syntax (22bcef93-4a3f-4183-89f9-2f8b8a628aee v0.0)
pub const IFSRM_OBJECT_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0x22bcef93_4a3f_4183_89f9_2f8b8a628aee, 0, 0);

/// Operation numbers for IFsrmObject
pub mod opnum {
    pub const GET_ID: u16 = 7;
    pub const GET_DESCRIPTION: u16 = 8;
    pub const SET_DESCRIPTION: u16 = 9;
    pub const DELETE: u16 = 10;
    pub const COMMIT: u16 = 11;
}

dcerpc::operation!(GetId, opnum::GET_ID, OrpcRequest, PropertyResponse<Uuid>);
dcerpc::operation!(
    GetDescription,
    opnum::GET_DESCRIPTION,
    OrpcRequest,
    PropertyResponse<Unique<Bstr>>
);
dcerpc::operation!(
    SetDescription,
    opnum::SET_DESCRIPTION,
    PropertyRequest<Unique<Bstr>>,
    OrpcResponse
);
dcerpc::operation!(Delete, opnum::DELETE, OrpcRequest, OrpcResponse);
dcerpc::operation!(Commit, opnum::COMMIT, OrpcRequest, OrpcResponse);
