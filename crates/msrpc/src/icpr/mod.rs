//! ICertPassage (MS-ICPR)
//!
//! Certificate enrollment over plain RPC: a single operation with the same
//! semantics as ICertRequestD::Request, without ORPC headers or IPIDs.

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
