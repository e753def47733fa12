//! IFsrmClassificationRule wire protocol

use crate::fsrm::ExecutionOption;
use dcerpc::SyntaxId;
use dcom::{OrpcRequest, OrpcResponse, PropertyRequest, PropertyResponse};
use midl_ndr::{Bstr, Unique};

/// IFsrmClassificationRule syntax (afc052c2-5315-45ab-841b-c6db0e120148 v0.0)
pub const IFSRM_CLASSIFICATION_RULE_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0xafc052c2_5315_45ab_841b_c6db0e120148, 0, 0);

/// Operation numbers for IFsrmClassificationRule
pub mod opnum {
    pub const GET_EXECUTION_OPTION: u16 = 24;
    pub const SET_EXECUTION_OPTION: u16 = 25;
    pub const GET_PROPERTY_AFFECTED: u16 = 26;
    pub const SET_PROPERTY_AFFECTED: u16 = 27;
    pub const GET_VALUE: u16 = 28;
    pub const SET_VALUE: u16 = 29;
}

dcerpc::operation!(
    GetExecutionOption,
    opnum::GET_EXECUTION_OPTION,
    OrpcRequest,
    PropertyResponse<ExecutionOption>
);
dcerpc::operation!(
    SetExecutionOption,
    opnum::SET_EXECUTION_OPTION,
    PropertyRequest<ExecutionOption>,
    OrpcResponse
);
dcerpc::operation!(
    GetPropertyAffected,
    opnum::GET_PROPERTY_AFFECTED,
    OrpcRequest,
    PropertyResponse<Unique<Bstr>>
);
dcerpc::operation!(
    SetPropertyAffected,
    opnum::SET_PROPERTY_AFFECTED,
    PropertyRequest<Unique<Bstr>>,
    OrpcResponse
);
dcerpc::operation!(GetValue, opnum::GET_VALUE, OrpcRequest, PropertyResponse<Unique<Bstr>>);
dcerpc::operation!(SetValue, opnum::SET_VALUE, PropertyRequest<Unique<Bstr>>, OrpcResponse);
