//! IRPCRemoteObject client

use super::protocol::*;
use crate::pan::async_notify::{AsyncNotifyClient, ASYNC_NOTIFY_SYNTAX};
use crate::pan::RemoteObjectHandle;
use dcerpc::{DceRpcClient, Result, Transport};
use tracing::debug;

/// IRPCRemoteObject client
#[derive(Clone, Debug)]
pub struct RemoteObjectClient {
    client: DceRpcClient,
}

impl RemoteObjectClient {
    /// Bind IRPCRemoteObject through `transport`
    pub async fn connect(transport: &dyn Transport) -> Result<Self> {
        let client = DceRpcClient::connect(transport, REMOTE_OBJECT_SYNTAX).await?;
        Ok(Self { client })
    }

    pub fn from_client(client: DceRpcClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DceRpcClient {
        &self.client
    }

    /// Bind IRPCAsyncNotify on the same association
    ///
    /// Remote object handles are only honoured on the association that
    /// created them.
    pub async fn async_notify(&self) -> Result<AsyncNotifyClient> {
        let client = self.client.sub_client(ASYNC_NOTIFY_SYNTAX).await?;
        Ok(AsyncNotifyClient::from_client(client))
    }

    /// Create a remote object
    pub async fn create(&self) -> Result<RemoteObjectHandle> {
        let response = self.client.invoke::<Create>(None, CreateRequest).await?;
        debug!("Created remote object {:?}", response.remote_object);
        Ok(response.remote_object)
    }

    /// Delete a remote object; the returned handle is nil
    pub async fn delete(&self, remote_object: RemoteObjectHandle) -> Result<RemoteObjectHandle> {
        let response = self
            .client
            .invoke::<Delete>(None, DeleteRequest { remote_object })
            .await?;
        Ok(response.remote_object)
    }
}
