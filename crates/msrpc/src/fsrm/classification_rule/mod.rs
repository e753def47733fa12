//! IFsrmClassificationRule (MS-FSRM 3.2.4.2.44)

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
