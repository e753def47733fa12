//! DCE RPC call plumbing for MS-RPC and DCOM interfaces
//!
//! This crate sits between the NDR codec ([`midl_ndr`]) and concrete
//! interface proxies:
//!
//! - [`Operation`] / [`Message`]: typed request and response envelopes
//! - [`Interface`] / [`InterfaceBuilder`]: dispatch tables with inheritance
//! - [`DceRpcServer`]: interface registry, bind checks and request routing
//! - [`Transport`] / [`Connection`]: the seam proxies call through
//! - [`LocalTransport`]: in-process transport to a [`DceRpcServer`]
//! - [`DceRpcClient`]: typed invocation with return-code checking
//! - [`StatusCode`]: HRESULT/Win32 values with a translation table
//!
//! # Example
//!
//! ```
//! use dcerpc::{DceRpcServer, InterfaceBuilder, LocalTransport, SyntaxId, Transport};
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> dcerpc::Result<()> {
//! let syntax = SyntaxId::from_u128(0x12345678_1234_1234_1234_123456789012, 1, 0);
//! let server = Arc::new(DceRpcServer::new());
//! server
//!     .register_interface(
//!         InterfaceBuilder::new("Echo", syntax)
//!             .operation(0, "Echo", |_ctx, stub| async move { Ok(stub) })
//!             .build(),
//!     )
//!     .await;
//!
//! let client = dcerpc::DceRpcClient::connect(&LocalTransport::new(server), syntax).await?;
//! let out = client.call(0, None, Bytes::from_static(b"hello")).await?;
//! assert_eq!(&out[..], b"hello");
//! # Ok(())
//! # }
//! ```

pub mod dcerpc;
pub mod dcerpc_client;
pub mod dcerpc_server;
pub mod dcerpc_transport;
pub mod error;
pub mod interface;
pub mod operation;
pub mod status;

// Re-export error types
pub use error::{Result, RpcError, Violation};

pub use dcerpc::{
    ndr_syntax, DataRepresentation, FaultStatus, IntRep, SyntaxId, NDR_SYNTAX_UUID,
    NDR_SYNTAX_VERSION,
};
pub use dcerpc_client::DceRpcClient;
pub use dcerpc_server::{
    DceRpcServer, DceRpcServerConfig, Reply, ServerStats, ServerStatsSnapshot,
};
pub use dcerpc_transport::{Call, Connection, ContextOptions, LocalTransport, Transport};
pub use interface::{CallContext, Dispatch, Interface, InterfaceBuilder, OperationHandler};
pub use operation::{check_utf16_len, decode_message, encode_message, Message, Operation, ReturnCode};
pub use status::StatusCode;

pub use uuid::Uuid;
