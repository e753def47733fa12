//! IFsrmObject (MS-FSRM 3.2.4.1)

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
