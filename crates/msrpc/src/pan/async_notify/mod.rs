//! IRPCAsyncNotify (MS-PAN 3.1.1)
//!
//! Registration, unidirectional polling and bidirectional channels. Every
//! handle passed to these operations must come from IRPCRemoteObject on the
//! same association.

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
