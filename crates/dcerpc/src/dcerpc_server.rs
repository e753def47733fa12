//! DCE RPC Server
//!
//! Holds the registered interfaces, accepts binds and routes requests to
//! operation handlers.
//!
//! - Interfaces are shared via `Arc<RwLock>` and the lock is released before
//!   a handler runs
//! - A bind must name a registered interface with a compatible version
//! - Unknown opnums fault with `nca_s_op_rng_error`, declared but unhandled
//!   ones with `E_NOTIMPL`
//! - Server statistics are tracked with relaxed atomics

use crate::dcerpc::{FaultStatus, SyntaxId};
use crate::error::{Result, RpcError};
use crate::interface::{CallContext, Dispatch, Interface};
use crate::status::StatusCode;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// DCE RPC Server configuration
#[derive(Debug, Clone)]
pub struct DceRpcServerConfig {
    /// Largest request stub accepted
    pub max_stub_size: usize,
}

impl Default for DceRpcServerConfig {
    fn default() -> Self {
        Self {
            max_stub_size: 4 * 1024 * 1024,
        }
    }
}

/// Server statistics
#[derive(Debug, Default)]
pub struct ServerStats {
    pub associations_opened: AtomicU64,
    pub binds_accepted: AtomicU64,
    pub binds_rejected: AtomicU64,
    pub requests_received: AtomicU64,
    pub requests_processed: AtomicU64,
    pub requests_failed: AtomicU64,
    pub bytes_received: AtomicU64,
    pub bytes_sent: AtomicU64,
}

impl ServerStats {
    pub fn snapshot(&self) -> ServerStatsSnapshot {
        ServerStatsSnapshot {
            associations_opened: self.associations_opened.load(Ordering::Relaxed),
            binds_accepted: self.binds_accepted.load(Ordering::Relaxed),
            binds_rejected: self.binds_rejected.load(Ordering::Relaxed),
            requests_received: self.requests_received.load(Ordering::Relaxed),
            requests_processed: self.requests_processed.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of server statistics
#[derive(Debug, Clone)]
pub struct ServerStatsSnapshot {
    pub associations_opened: u64,
    pub binds_accepted: u64,
    pub binds_rejected: u64,
    pub requests_received: u64,
    pub requests_processed: u64,
    pub requests_failed: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

/// Result of processing one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Response(Bytes),
    Fault(StatusCode),
}

/// DCE RPC Server
pub struct DceRpcServer {
    interfaces: Arc<RwLock<HashMap<Uuid, Arc<Interface>>>>,
    config: DceRpcServerConfig,
    assoc_group_counter: AtomicU32,
    stats: Arc<ServerStats>,
}

impl DceRpcServer {
    pub fn new() -> Self {
        Self::with_config(DceRpcServerConfig::default())
    }

    pub fn with_config(config: DceRpcServerConfig) -> Self {
        Self {
            interfaces: Arc::new(RwLock::new(HashMap::new())),
            config,
            assoc_group_counter: AtomicU32::new(1),
            stats: Arc::new(ServerStats::default()),
        }
    }

    /// Get server statistics
    pub fn stats(&self) -> &Arc<ServerStats> {
        &self.stats
    }

    pub fn config(&self) -> &DceRpcServerConfig {
        &self.config
    }

    /// Register an interface with the server
    pub async fn register_interface(&self, interface: Interface) -> Arc<Interface> {
        let interface = Arc::new(interface);
        let mut interfaces = self.interfaces.write().await;
        info!(
            "Registering interface: {} ({}, {} operations)",
            interface.name(),
            interface.syntax(),
            interface.op_count()
        );
        interfaces.insert(interface.syntax().uuid, Arc::clone(&interface));
        interface
    }

    /// Allocate a new association group
    pub fn open_association(&self) -> u32 {
        self.stats.associations_opened.fetch_add(1, Ordering::Relaxed);
        self.assoc_group_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Accept or reject a presentation context for `requested`
    pub async fn bind(&self, requested: SyntaxId) -> Result<Arc<Interface>> {
        let interfaces = self.interfaces.read().await;
        let result = match interfaces.get(&requested.uuid) {
            None => Err(RpcError::InterfaceNotFound(requested)),
            Some(interface) if !interface.syntax().accepts(&requested) => {
                Err(RpcError::VersionMismatch {
                    requested,
                    offered: interface.syntax(),
                })
            }
            Some(interface) => Ok(Arc::clone(interface)),
        };

        match &result {
            Ok(interface) => {
                self.stats.binds_accepted.fetch_add(1, Ordering::Relaxed);
                debug!("Bind accepted: {} ({})", interface.name(), requested);
            }
            Err(e) => {
                self.stats.binds_rejected.fetch_add(1, Ordering::Relaxed);
                warn!("Bind rejected: {}", e);
            }
        }
        result
    }

    /// Route one request to its handler
    pub async fn process_request(&self, interface: &Interface, ctx: CallContext, stub: Bytes) -> Reply {
        self.stats.requests_received.fetch_add(1, Ordering::Relaxed);
        self.stats
            .bytes_received
            .fetch_add(stub.len() as u64, Ordering::Relaxed);

        let call_id = ctx.call_id;
        let opnum = ctx.opnum;
        debug!(
            "Received request: call_id={}, interface={}, opnum={}, stub_len={}",
            call_id,
            interface.name(),
            opnum,
            stub.len()
        );

        if stub.len() > self.config.max_stub_size {
            warn!(
                "Request stub of {} bytes exceeds maximum {}",
                stub.len(),
                self.config.max_stub_size
            );
            return self.fault(FaultStatus::BadStubData.into());
        }

        let (name, handler) = match interface.dispatch(opnum) {
            Some(Dispatch::Handler { name, handler }) => (name, Arc::clone(handler)),
            Some(Dispatch::NotImplemented(name)) => {
                debug!("{}: opnum {} ({}) is not implemented", interface.name(), opnum, name);
                return self.fault(FaultStatus::NotImplemented.into());
            }
            None => {
                warn!("{}: unhandled opnum {}", interface.name(), opnum);
                return self.fault(FaultStatus::OpRngError.into());
            }
        };

        match handler(ctx, stub).await {
            Ok(result) => {
                self.stats.requests_processed.fetch_add(1, Ordering::Relaxed);
                self.stats
                    .bytes_sent
                    .fetch_add(result.len() as u64, Ordering::Relaxed);
                Reply::Response(result)
            }
            Err(RpcError::NotImplemented(op)) => {
                debug!("{}: not implemented by server", op);
                self.fault(FaultStatus::NotImplemented.into())
            }
            Err(e) => {
                error!("Operation error: call_id={}, {}: {}", call_id, name, e);
                self.fault(e.fault_status())
            }
        }
    }

    fn fault(&self, status: StatusCode) -> Reply {
        self.stats.requests_failed.fetch_add(1, Ordering::Relaxed);
        Reply::Fault(status)
    }
}

impl Default for DceRpcServer {
    fn default() -> Self {
        Self::new()
    }
}
