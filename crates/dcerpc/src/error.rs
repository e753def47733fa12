//! Error types for DCE RPC

use crate::dcerpc::{FaultStatus, SyntaxId};
use crate::status::StatusCode;
use midl_ndr::NdrError;
use thiserror::Error;

/// RPC error types
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("NDR error: {0}")]
    Ndr(#[from] NdrError),

    #[error("{op}: {violation}")]
    Validation {
        op: &'static str,
        #[source]
        violation: Violation,
    },

    #[error("interface not found: {0}")]
    InterfaceNotFound(SyntaxId),

    #[error("version mismatch: requested {requested}, server offers {offered}")]
    VersionMismatch { requested: SyntaxId, offered: SyntaxId },

    #[error("bind failed: {0}")]
    BindFailed(String),

    #[error("operation unavailable: {0}")]
    OperationUnavailable(u16),

    #[error("{0}: not implemented")]
    NotImplemented(&'static str),

    #[error("{0}: ipid is missing")]
    MissingIpid(&'static str),

    #[error("{op}: {status}")]
    Status { op: &'static str, status: StatusCode },

    #[error("fault: {0}")]
    Fault(StatusCode),

    #[error("stub data too large: {size} bytes exceeds maximum {max}")]
    StubTooLarge { size: usize, max: usize },

    #[error("connection closed")]
    ConnectionClosed,

    #[error("timeout")]
    Timeout,
}

impl RpcError {
    /// Status the server reports to the caller when a handler fails with `self`
    pub fn fault_status(&self) -> StatusCode {
        match self {
            RpcError::Ndr(_) | RpcError::StubTooLarge { .. } => FaultStatus::BadStubData.into(),
            RpcError::Validation { .. } => StatusCode::E_INVALIDARG,
            RpcError::InterfaceNotFound(_) | RpcError::VersionMismatch { .. } => {
                FaultStatus::UnkIf.into()
            }
            RpcError::OperationUnavailable(_) => FaultStatus::OpRngError.into(),
            RpcError::NotImplemented(_) => FaultStatus::NotImplemented.into(),
            RpcError::MissingIpid(_) => FaultStatus::ContextMismatch.into(),
            RpcError::Status { status, .. } | RpcError::Fault(status) => *status,
            RpcError::BindFailed(_)
            | RpcError::ConnectionClosed
            | RpcError::Timeout => FaultStatus::RpcError.into(),
        }
    }

    /// The remote status carried by this error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RpcError::Status { status, .. } | RpcError::Fault(status) => Some(*status),
            _ => None,
        }
    }
}

/// A request field that breaks its declared constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct Violation {
    pub field: &'static str,
    pub reason: String,
}

impl Violation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// A string longer than its ceiling, measured in UTF-16 code units
    pub fn too_long(field: &'static str, len: usize, max: usize) -> Self {
        Self::new(field, format!("length {} exceeds maximum {}", len, max))
    }

    /// A non-optional value left empty
    pub fn required(field: &'static str) -> Self {
        Self::new(field, "value is required")
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;
