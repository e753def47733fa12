//! DCOM client proxy addressing
//!
//! A [`DcomClient`] is a bound connection plus the IPID of the object the
//! proxy talks to. Every call must be addressed: the IPID comes from the
//! per-call [`CallOptions`] first, then from the proxy itself. A call with
//! neither fails locally with [`RpcError::MissingIpid`] and nothing is sent.
//!
//! Proxies for derived interfaces share one binding with their bases: the
//! derived interface binds once and each base proxy is built with
//! [`DcomClient::superclass`] on the same connection.

use crate::types::Ipid;
use dcerpc::{
    Connection, ContextOptions, DceRpcClient, Operation, Result, RpcError, SyntaxId, Transport,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Per-call options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Overrides the proxy's IPID for this call
    pub ipid: Option<Ipid>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ipid(ipid: Ipid) -> Self {
        Self { ipid: Some(ipid) }
    }
}

/// A bound DCOM connection with an optional stored IPID
#[derive(Clone, Debug)]
pub struct DcomClient {
    rpc: DceRpcClient,
    ipid: Option<Ipid>,
}

impl DcomClient {
    /// Bind `syntax` through `transport`
    pub async fn bind(transport: &dyn Transport, syntax: SyntaxId) -> Result<Self> {
        let rpc = DceRpcClient::connect(transport, syntax).await?;
        Ok(Self { rpc, ipid: None })
    }

    /// Wrap an already bound connection
    pub fn from_connection(conn: Arc<dyn Connection>) -> Self {
        Self {
            rpc: DceRpcClient::from_connection(conn),
            ipid: None,
        }
    }

    /// Reuse `derived`'s binding for a base interface proxy
    pub fn superclass(derived: &DcomClient) -> Self {
        trace!("Reusing binding {} as superclass", derived.rpc.interface());
        derived.clone()
    }

    /// Fail calls that take longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.rpc = self.rpc.with_timeout(timeout);
        self
    }

    /// A copy of this proxy addressed to `ipid`
    pub fn with_ipid(&self, ipid: Ipid) -> Self {
        Self {
            rpc: self.rpc.clone(),
            ipid: Some(ipid),
        }
    }

    pub fn ipid(&self) -> Option<Ipid> {
        self.ipid
    }

    pub fn conn(&self) -> &Arc<dyn Connection> {
        self.rpc.conn()
    }

    /// Renegotiate presentation parameters without rebinding
    pub async fn alter_context(&self, options: ContextOptions) -> Result<()> {
        debug!("Altering context on {}", self.rpc.interface());
        self.rpc.alter_context(options).await
    }

    /// The IPID a call to `op` is addressed to
    pub fn resolve_ipid(&self, op: &'static str, options: &CallOptions) -> Result<Ipid> {
        options
            .ipid
            .or(self.ipid)
            .ok_or(RpcError::MissingIpid(op))
    }

    /// Invoke `O` on the addressed object; a failing HRESULT is an error
    pub async fn invoke<O: Operation>(&self, request: O::Request, options: &CallOptions) -> Result<O::Response> {
        let ipid = self.resolve_ipid(O::NAME, options)?;
        self.rpc.invoke::<O>(Some(ipid.uuid()), request).await
    }

    /// Invoke `O` and return the response whatever its HRESULT
    pub async fn invoke_unchecked<O: Operation>(
        &self,
        request: O::Request,
        options: &CallOptions,
    ) -> Result<O::Response> {
        let ipid = self.resolve_ipid(O::NAME, options)?;
        self.rpc.invoke_unchecked::<O>(Some(ipid.uuid()), request).await
    }
}
