//! IRPCAsyncNotify server

use super::protocol::*;
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Result};
use std::sync::Arc;

/// Server-side behaviour of IRPCAsyncNotify
///
/// Lifecycle failures are reported in the response's return code; an `Err`
/// becomes a fault.
#[async_trait]
pub trait AsyncNotifyHandler: Send + Sync + 'static {
    async fn register_client(
        &self,
        ctx: &CallContext,
        request: RegisterClientRequest,
    ) -> Result<RegisterClientResponse>;

    async fn unregister_client(&self, ctx: &CallContext, request: RemoteObjectRequest) -> Result<StatusResponse>;

    /// Blocks until at least one channel is available
    async fn get_new_channel(&self, ctx: &CallContext, request: RemoteObjectRequest)
        -> Result<GetNewChannelResponse>;

    /// Delivers the client's response, then blocks for the next notification
    async fn get_notification_send_response(
        &self,
        ctx: &CallContext,
        request: GetNotificationSendResponseRequest,
    ) -> Result<GetNotificationSendResponseResponse>;

    /// Blocks until a notification is queued
    async fn get_notification(
        &self,
        ctx: &CallContext,
        request: RemoteObjectRequest,
    ) -> Result<GetNotificationResponse>;

    async fn close_channel(&self, ctx: &CallContext, request: CloseChannelRequest) -> Result<CloseChannelResponse>;
}

/// IRPCAsyncNotify server
pub struct AsyncNotifyServer {
    handler: Arc<dyn AsyncNotifyHandler>,
}

impl AsyncNotifyServer {
    pub fn new(handler: Arc<dyn AsyncNotifyHandler>) -> Self {
        Self { handler }
    }

    /// Build the DCE RPC interface
    pub fn build_interface(&self) -> Interface {
        let register = Arc::clone(&self.handler);
        let unregister = Arc::clone(&self.handler);
        let new_channel = Arc::clone(&self.handler);
        let send_response = Arc::clone(&self.handler);
        let notification = Arc::clone(&self.handler);
        let close = Arc::clone(&self.handler);

        InterfaceBuilder::new("IRPCAsyncNotify", ASYNC_NOTIFY_SYNTAX)
            .typed::<RegisterClient, _, _>(move |ctx, request| {
                let handler = Arc::clone(&register);
                async move { handler.register_client(&ctx, request).await }
            })
            .typed::<UnregisterClient, _, _>(move |ctx, request| {
                let handler = Arc::clone(&unregister);
                async move { handler.unregister_client(&ctx, request).await }
            })
            .declare(opnum::RESERVED, "Reserved")
            .typed::<GetNewChannel, _, _>(move |ctx, request| {
                let handler = Arc::clone(&new_channel);
                async move { handler.get_new_channel(&ctx, request).await }
            })
            .typed::<GetNotificationSendResponse, _, _>(move |ctx, request| {
                let handler = Arc::clone(&send_response);
                async move { handler.get_notification_send_response(&ctx, request).await }
            })
            .typed::<GetNotification, _, _>(move |ctx, request| {
                let handler = Arc::clone(&notification);
                async move { handler.get_notification(&ctx, request).await }
            })
            .typed::<CloseChannel, _, _>(move |ctx, request| {
                let handler = Arc::clone(&close);
                async move { handler.close_channel(&ctx, request).await }
            })
            .build()
    }

    /// Register with a DCE RPC server
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        server.register_interface(self.build_interface()).await
    }
}
