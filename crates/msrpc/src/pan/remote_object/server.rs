//! IRPCRemoteObject server

use super::protocol::*;
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Result};
use std::sync::Arc;

/// Server-side behaviour of IRPCRemoteObject
#[async_trait]
pub trait RemoteObjectHandler: Send + Sync + 'static {
    async fn create(&self, ctx: &CallContext) -> Result<CreateResponse>;

    /// Release a handle; a handle that is unknown to the caller is rejected
    async fn delete(&self, ctx: &CallContext, request: DeleteRequest) -> Result<DeleteResponse>;
}

/// IRPCRemoteObject server
pub struct RemoteObjectServer {
    handler: Arc<dyn RemoteObjectHandler>,
}

impl RemoteObjectServer {
    pub fn new(handler: Arc<dyn RemoteObjectHandler>) -> Self {
        Self { handler }
    }

    /// Build the DCE RPC interface
    pub fn build_interface(&self) -> Interface {
        let create = Arc::clone(&self.handler);
        let delete = Arc::clone(&self.handler);

        InterfaceBuilder::new("IRPCRemoteObject", REMOTE_OBJECT_SYNTAX)
            .typed::<Create, _, _>(move |ctx, _request| {
                let handler = Arc::clone(&create);
                async move { handler.create(&ctx).await }
            })
            .typed::<Delete, _, _>(move |ctx, request| {
                let handler = Arc::clone(&delete);
                async move { handler.delete(&ctx, request).await }
            })
            .build()
    }

    /// Register with a DCE RPC server
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        server.register_interface(self.build_interface()).await
    }
}
