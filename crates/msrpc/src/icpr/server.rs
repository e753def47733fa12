//! ICertPassage server

use super::protocol::*;
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Result};
use std::sync::Arc;

/// Server-side behaviour of ICertPassage
#[async_trait]
pub trait CertPassageHandler: Send + Sync + 'static {
    async fn cert_server_request(
        &self,
        ctx: &CallContext,
        request: CertServerRequestRequest,
    ) -> Result<CertServerRequestResponse>;
}

/// ICertPassage server
pub struct CertPassageServer {
    handler: Arc<dyn CertPassageHandler>,
}

impl CertPassageServer {
    pub fn new(handler: Arc<dyn CertPassageHandler>) -> Self {
        Self { handler }
    }

    /// Build the DCE RPC interface
    pub fn build_interface(&self) -> Interface {
        let handler = Arc::clone(&self.handler);
        InterfaceBuilder::new("ICertPassage", ICERT_PASSAGE_SYNTAX)
            .typed::<CertServerRequest, _, _>(move |ctx, request| {
                let handler = Arc::clone(&handler);
                async move { handler.cert_server_request(&ctx, request).await }
            })
            .build()
    }

    /// Register with a DCE RPC server
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        server.register_interface(self.build_interface()).await
    }
}
