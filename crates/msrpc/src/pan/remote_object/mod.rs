//! IRPCRemoteObject (MS-PAN 3.1.2)
//!
//! Creates and deletes the remote object handles that notification
//! registrations hang off.

mod client;
mod protocol;
mod server;

pub use client::*;
pub use protocol::*;
pub use server::*;
