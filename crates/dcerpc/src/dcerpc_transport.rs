//! DCE RPC transport seam
//!
//! Proxies never see sockets. A [`Transport`] binds an abstract syntax and
//! hands back a [`Connection`]: a bound presentation context that carries
//! one call at a time from the caller's point of view (many may be in
//! flight concurrently on the same connection).
//!
//! [`LocalTransport`] is the in-process implementation: calls go straight
//! to a [`DceRpcServer`] without leaving the process.

use crate::dcerpc::{DataRepresentation, SyntaxId};
use crate::dcerpc_server::{DceRpcServer, Reply};
use crate::error::{Result, RpcError};
use crate::interface::{CallContext, Interface};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// One request as handed to a connection
#[derive(Debug, Clone)]
pub struct Call {
    pub opnum: u16,
    /// Object UUID; DCOM calls carry the target IPID here
    pub object: Option<Uuid>,
    pub stub: Bytes,
}

/// Parameters renegotiated by an alter-context exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextOptions {
    pub data_representation: DataRepresentation,
}

/// Something that can bind an interface
#[async_trait]
pub trait Transport: Send + Sync {
    /// Bind `syntax`; fails if the peer does not offer a compatible version
    async fn bind(&self, syntax: SyntaxId) -> Result<Arc<dyn Connection>>;
}

/// A bound presentation context
#[async_trait]
pub trait Connection: Send + Sync {
    /// Abstract syntax this connection is bound to
    fn syntax(&self) -> SyntaxId;

    /// Data representation currently used for stub data
    fn data_representation(&self) -> DataRepresentation;

    /// Send one request and wait for its response stub
    async fn invoke(&self, call: Call) -> Result<Bytes>;

    /// Renegotiate presentation parameters on the existing binding
    async fn alter_context(&self, options: ContextOptions) -> Result<()>;

    /// Bind another interface on the same association
    async fn sub_connection(&self, syntax: SyntaxId) -> Result<Arc<dyn Connection>>;
}

/// In-process transport to a [`DceRpcServer`]
#[derive(Clone)]
pub struct LocalTransport {
    server: Arc<DceRpcServer>,
    closed: Arc<AtomicBool>,
}

impl LocalTransport {
    pub fn new(server: Arc<DceRpcServer>) -> Self {
        Self {
            server,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn server(&self) -> &Arc<DceRpcServer> {
        &self.server
    }

    /// Close every connection made through this transport
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn bind(&self, syntax: SyntaxId) -> Result<Arc<dyn Connection>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(RpcError::ConnectionClosed);
        }
        let interface = self.server.bind(syntax).await?;
        let association = self.server.open_association();
        debug!("Bound {} on association {}", syntax, association);
        Ok(Arc::new(LocalConnection {
            server: Arc::clone(&self.server),
            interface,
            syntax,
            association,
            call_id_counter: Arc::new(AtomicU32::new(1)),
            data_representation: Mutex::new(DataRepresentation::ndr()),
            closed: Arc::clone(&self.closed),
        }))
    }
}

struct LocalConnection {
    server: Arc<DceRpcServer>,
    interface: Arc<Interface>,
    syntax: SyntaxId,
    association: u32,
    call_id_counter: Arc<AtomicU32>,
    data_representation: Mutex<DataRepresentation>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl Connection for LocalConnection {
    fn syntax(&self) -> SyntaxId {
        self.syntax
    }

    fn data_representation(&self) -> DataRepresentation {
        *self.data_representation.lock()
    }

    async fn invoke(&self, call: Call) -> Result<Bytes> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(RpcError::ConnectionClosed);
        }
        let call_id = self.call_id_counter.fetch_add(1, Ordering::SeqCst);
        let ctx = CallContext {
            call_id,
            opnum: call.opnum,
            object: call.object,
            association: self.association,
            ndr: self.data_representation().ndr_context(),
        };
        trace!(
            "Sending request: call_id={}, opnum={}, stub_len={}",
            call_id,
            call.opnum,
            call.stub.len()
        );

        match self.server.process_request(&self.interface, ctx, call.stub).await {
            Reply::Response(stub) => Ok(stub),
            Reply::Fault(status) => Err(RpcError::Fault(status)),
        }
    }

    async fn alter_context(&self, options: ContextOptions) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(RpcError::ConnectionClosed);
        }
        debug!(
            "Alter context on {}: {:?}",
            self.syntax, options.data_representation
        );
        *self.data_representation.lock() = options.data_representation;
        Ok(())
    }

    async fn sub_connection(&self, syntax: SyntaxId) -> Result<Arc<dyn Connection>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(RpcError::ConnectionClosed);
        }
        let interface = self.server.bind(syntax).await?;
        Ok(Arc::new(LocalConnection {
            server: Arc::clone(&self.server),
            interface,
            syntax,
            association: self.association,
            call_id_counter: Arc::clone(&self.call_id_counter),
            data_representation: Mutex::new(self.data_representation()),
            closed: Arc::clone(&self.closed),
        }))
    }
}
