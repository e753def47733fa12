//! Microsoft RPC interfaces built on `dcerpc` and `dcom`
//!
//! Each interface module follows the same layout:
//!
//! - `protocol`: syntax, opnums and the typed request/response envelopes
//! - `server`: a handler trait and the dispatch table built from it
//! - `client`: a proxy bound to the interface
//!
//! # Interfaces
//!
//! - [`pan`]: print asynchronous notification (IRPCRemoteObject,
//!   IRPCAsyncNotify) and a stateful [`pan::NotificationServer`]
//! - [`icpr`]: ICertPassage certificate requests over plain RPC
//! - [`wcce`]: ICertRequestD and ICertRequestD2 over DCOM
//! - [`fsrm`]: the IFsrmObject → IFsrmRule → IFsrmClassificationRule chain

pub mod fsrm;
pub mod icpr;
pub mod pan;
pub mod wcce;
