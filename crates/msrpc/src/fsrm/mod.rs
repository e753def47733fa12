//! File Server Resource Manager (MS-FSRM) classification rules
//!
//! Three DCOM interfaces stacked on IDispatch:
//!
//! ```text
//! IUnknown                  0..3    never sent over ORPC
//! IDispatch                 3..7    declared, not implemented
//! IFsrmObject               7..12   Id, Description, Delete, Commit
//! IFsrmRule                12..24   Name, RuleType, ModuleDefinitionName, ...
//! IFsrmClassificationRule  24..30   ExecutionOption, PropertyAffected, Value
//! ```
//!
//! Handlers return plain values; a `RpcError::Status` from a handler is sent
//! back as the response HRESULT, any other error as a fault. Each client
//! owns the client of its base interface on the same binding.

pub mod classification_rule;
pub mod object;
pub mod rule;

use dcerpc::{Result, RpcError};
use dcom::{OrpcResponse, OrpcThat, PropertyResponse};

midl_ndr::ndr_enum! {
    /// Kind of an FSRM rule (`FsrmRuleType`)
    pub enum RuleType: u16 {
        Unknown = 0,
        Classification = 1,
        Generic = 2,
    }
}

midl_ndr::ndr_enum! {
    /// How a classification rule treats existing property values (`FsrmExecutionOption`)
    pub enum ExecutionOption: u16 {
        Unknown = 0,
        EvaluateUnset = 1,
        ReEvaluateConsiderExistingValue = 2,
        ReEvaluateIgnoreExistingValue = 3,
    }
}

/// Wrap a getter result in its response envelope
pub(crate) fn property<T: Default>(result: Result<T>) -> Result<PropertyResponse<T>> {
    match result {
        Ok(value) => Ok(PropertyResponse::ok(value)),
        Err(RpcError::Status { status, .. }) => Ok(PropertyResponse {
            that: OrpcThat::new(),
            value: T::default(),
            status,
        }),
        Err(err) => Err(err),
    }
}

/// Wrap a setter or action result in its response envelope
pub(crate) fn completed(result: Result<()>) -> Result<OrpcResponse> {
    match result {
        Ok(()) => Ok(OrpcResponse::default()),
        Err(RpcError::Status { status, .. }) => Ok(OrpcResponse {
            that: OrpcThat::new(),
            status,
        }),
        Err(err) => Err(err),
    }
}
