//! ICertRequestD2 (MS-WCCE 3.2.1.4.3)
//!
//! Extends ICertRequestD with Request2 and CA property queries. The proxy
//! owns an ICertRequestD proxy on the same binding.

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
