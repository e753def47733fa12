//! DCE RPC Client
//!
//! Typed invocation over a bound [`Connection`].

use crate::dcerpc::SyntaxId;
use crate::dcerpc_transport::{Call, Connection, ContextOptions, Transport};
use crate::error::{Result, RpcError};
use crate::operation::{decode_message, encode_message, Operation, ReturnCode};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};
use uuid::Uuid;

/// DCE RPC Client for making calls on a bound interface
#[derive(Clone)]
pub struct DceRpcClient {
    conn: Arc<dyn Connection>,
    timeout: Option<Duration>,
}

impl DceRpcClient {
    /// Bind `interface` through `transport`
    pub async fn connect(transport: &dyn Transport, interface: SyntaxId) -> Result<Self> {
        let conn = transport.bind(interface).await?;
        debug!("Bound client to {}", interface);
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already bound connection
    pub fn from_connection(conn: Arc<dyn Connection>) -> Self {
        Self {
            conn,
            timeout: None,
        }
    }

    /// Fail calls that take longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn conn(&self) -> &Arc<dyn Connection> {
        &self.conn
    }

    pub fn interface(&self) -> SyntaxId {
        self.conn.syntax()
    }

    /// Send raw stub data for `opnum`
    pub async fn call(&self, opnum: u16, object: Option<Uuid>, stub: Bytes) -> Result<Bytes> {
        let call = self.conn.invoke(Call {
            opnum,
            object,
            stub,
        });
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .map_err(|_| RpcError::Timeout)?,
            None => call.await,
        }
    }

    /// Invoke `O` and treat a non-zero return value as an error
    pub async fn invoke<O: Operation>(&self, object: Option<Uuid>, request: O::Request) -> Result<O::Response> {
        let response = self.invoke_unchecked::<O>(object, request).await?;
        let status = response.return_code();
        if !status.is_success() {
            debug!("{} returned {}", O::NAME, status);
            return Err(RpcError::Status { op: O::NAME, status });
        }
        Ok(response)
    }

    /// Invoke `O` and hand back the response whatever its return value
    pub async fn invoke_unchecked<O: Operation>(
        &self,
        object: Option<Uuid>,
        request: O::Request,
    ) -> Result<O::Response> {
        let ndr = self.conn.data_representation().ndr_context();
        let stub = encode_message(O::NAME, request, ndr)?;
        trace!("{}: opnum={}, stub_len={}", O::NAME, O::OPNUM, stub.len());
        let out = self.call(O::OPNUM, object, stub).await?;
        decode_message(&out, ndr)
    }

    /// Renegotiate presentation parameters on the existing binding
    pub async fn alter_context(&self, options: ContextOptions) -> Result<()> {
        self.conn.alter_context(options).await
    }

    /// A client for another interface on the same association
    pub async fn sub_client(&self, interface: SyntaxId) -> Result<Self> {
        let conn = self.conn.sub_connection(interface).await?;
        Ok(Self {
            conn,
            timeout: self.timeout,
        })
    }
}

impl std::fmt::Debug for DceRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DceRpcClient")
            .field("interface", &self.conn.syntax())
            .field("timeout", &self.timeout)
            .finish()
    }
}
