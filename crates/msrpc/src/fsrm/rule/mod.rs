//! IFsrmRule (MS-FSRM 3.2.4.2.43)
//!
//! Extends IFsrmObject. The SAFEARRAY properties (NamespaceRoots,
//! Parameters) are declared in the table but not implemented.

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
