//! DCOM (Distributed Component Object Model) object RPC layer
//!
//! Builds the DCOM calling convention on top of the `dcerpc` crate,
//! following MS-DCOM.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Interface proxies and servers (msrpc)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    DCOM Layer (this crate)                  │
//! │  ORPCTHIS / ORPCTHAT  │  IPID addressing  │  Object table   │
//! │  IUnknown / IDispatch base tables                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  DCE RPC Layer (dcerpc crate)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! - **IPID**: Interface Pointer ID - identifies an interface on an object;
//!   every ORPC call is addressed to one
//! - **ORPCTHIS/ORPCTHAT**: headers that open every request and response
//! - **Superclass binding**: a derived interface's proxy shares its bound
//!   connection with the proxies of its base interfaces
//!
//! # Modules
//!
//! - [`types`]: Core DCOM data types
//! - [`call`]: Generic ORPC request/response envelopes
//! - [`iunknown`]: IUnknown and IDispatch base tables

pub mod call;
pub mod iunknown;
pub mod types;

mod client;
mod server;

// Re-export main types and client/server APIs
pub use call::{OrpcRequest, OrpcResponse, PropertyRequest, PropertyResponse};
pub use client::{CallOptions, DcomClient};
pub use iunknown::{idispatch_interface, iunknown_interface, IDISPATCH_SYNTAX, IUNKNOWN_SYNTAX};
pub use server::ObjectTable;
pub use types::{hresult, ComVersion, Ipid, OrpcExtent, OrpcExtentArray, OrpcThat, OrpcThis};

/// DCOM version supported by this implementation
pub const DCOM_VERSION: ComVersion = ComVersion::DCOM_5_7;
