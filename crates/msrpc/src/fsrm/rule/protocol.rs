//! IFsrmRule wire protocol

use crate::fsrm::RuleType;
use dcerpc::SyntaxId;
use dcom::{OrpcRequest, OrpcResponse, PropertyRequest, PropertyResponse};
use midl_ndr::{Bstr, Unique};

/// IFsrmRule syntax (cb0df960-16f5-4495-9079-3f9360d831df v0.0)
pub const IFSRM_RULE_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0xcb0df960_16f5_4495_9079_3f9360d831df, 0, 0);

/// Operation numbers for IFsrmRule
pub mod opnum {
    pub const GET_NAME: u16 = 12;
    pub const SET_NAME: u16 = 13;
    pub const GET_RULE_TYPE: u16 = 14;
    pub const GET_MODULE_DEFINITION_NAME: u16 = 15;
    pub const SET_MODULE_DEFINITION_NAME: u16 = 16;
    pub const GET_NAMESPACE_ROOTS: u16 = 17;
    pub const SET_NAMESPACE_ROOTS: u16 = 18;
    pub const GET_RULE_FLAGS: u16 = 19;
    pub const SET_RULE_FLAGS: u16 = 20;
    pub const GET_PARAMETERS: u16 = 21;
    pub const SET_PARAMETERS: u16 = 22;
    pub const GET_LAST_MODIFIED: u16 = 23;
}

dcerpc::operation!(GetName, opnum::GET_NAME, OrpcRequest, PropertyResponse<Unique<Bstr>>);
dcerpc::operation!(SetName, opnum::SET_NAME, PropertyRequest<Unique<Bstr>>, OrpcResponse);
dcerpc::operation!(GetRuleType, opnum::GET_RULE_TYPE, OrpcRequest, PropertyResponse<RuleType>);
dcerpc::operation!(
    GetModuleDefinitionName,
    opnum::GET_MODULE_DEFINITION_NAME,
    OrpcRequest,
    PropertyResponse<Unique<Bstr>>
);
dcerpc::operation!(
    SetModuleDefinitionName,
    opnum::SET_MODULE_DEFINITION_NAME,
    PropertyRequest<Unique<Bstr>>,
    OrpcResponse
);
dcerpc::operation!(GetRuleFlags, opnum::GET_RULE_FLAGS, OrpcRequest, PropertyResponse<i32>);
dcerpc::operation!(SetRuleFlags, opnum::SET_RULE_FLAGS, PropertyRequest<i32>, OrpcResponse);
dcerpc::operation!(
    /// Last modification time as an OLE Automation date
    GetLastModified,
    opnum::GET_LAST_MODIFIED,
    OrpcRequest,
    PropertyResponse<f64>
);
