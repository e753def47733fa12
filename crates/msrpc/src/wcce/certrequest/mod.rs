//! ICertRequestD (MS-WCCE 3.2.1.4.2)
//!
//! Certificate enrollment over DCOM. Own opnums start at 3, after IUnknown.

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
