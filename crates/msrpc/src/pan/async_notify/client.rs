//! IRPCAsyncNotify client

use super::protocol::*;
use crate::pan::{ConversationStyle, Notification, NotifyObjectHandle, RemoteObjectHandle, UserFilter};
use dcerpc::{DceRpcClient, Result, Transport};
use midl_ndr::Uuid;
use tracing::debug;

/// IRPCAsyncNotify client
///
/// Bind it with [`RemoteObjectClient::async_notify`](crate::pan::remote_object::RemoteObjectClient::async_notify)
/// so that remote object handles stay on the association that created them.
/// A non-zero return code surfaces as [`dcerpc::RpcError::Status`].
#[derive(Clone, Debug)]
pub struct AsyncNotifyClient {
    client: DceRpcClient,
}

impl AsyncNotifyClient {
    /// Bind IRPCAsyncNotify on a new association
    pub async fn connect(transport: &dyn Transport) -> Result<Self> {
        let client = DceRpcClient::connect(transport, ASYNC_NOTIFY_SYNTAX).await?;
        Ok(Self { client })
    }

    pub fn from_client(client: DceRpcClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DceRpcClient {
        &self.client
    }

    /// Register `remote_object` for one notification type; returns the referral
    pub async fn register_client(
        &self,
        remote_object: RemoteObjectHandle,
        name: &str,
        notification_type: Uuid,
        filter: UserFilter,
        style: ConversationStyle,
    ) -> Result<String> {
        let request = RegisterClientRequest::new(remote_object, name, notification_type, filter, style);
        let response = self.client.invoke::<RegisterClient>(None, request).await?;
        debug!("Registered {} for {}", name, notification_type);
        Ok(response.referral.into_string())
    }

    pub async fn unregister_client(&self, remote_object: RemoteObjectHandle) -> Result<()> {
        self.client
            .invoke::<UnregisterClient>(None, RemoteObjectRequest::new(remote_object))
            .await?;
        Ok(())
    }

    /// Wait for channels opened for a bidirectional registration
    pub async fn get_new_channel(&self, remote_object: RemoteObjectHandle) -> Result<Vec<NotifyObjectHandle>> {
        let response = self
            .client
            .invoke::<GetNewChannel>(None, RemoteObjectRequest::new(remote_object))
            .await?;
        Ok(response.into_channels())
    }

    /// Send an optional response on `channel` and wait for the next notification
    pub async fn get_notification_send_response(
        &self,
        channel: NotifyObjectHandle,
        response: Option<&Notification>,
    ) -> Result<(NotifyObjectHandle, Notification)> {
        let request = GetNotificationSendResponseRequest::new(channel, response);
        let response = self.client.invoke::<GetNotificationSendResponse>(None, request).await?;
        let notification = response.notification_data().unwrap_or_default();
        Ok((response.channel, notification))
    }

    /// Wait for the next notification of a unidirectional registration
    pub async fn get_notification(&self, remote_object: RemoteObjectHandle) -> Result<Notification> {
        let response = self
            .client
            .invoke::<GetNotification>(None, RemoteObjectRequest::new(remote_object))
            .await?;
        Ok(response.notification_data().unwrap_or_default())
    }

    /// Close `channel`, passing a final response
    pub async fn close_channel(&self, channel: NotifyObjectHandle, notification_type: Uuid, reason: &[u8]) -> Result<()> {
        self.client
            .invoke::<CloseChannel>(None, CloseChannelRequest::new(channel, notification_type, reason))
            .await?;
        debug!("Closed channel {:?}", channel);
        Ok(())
    }
}
