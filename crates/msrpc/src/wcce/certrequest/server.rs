//! ICertRequestD server

use super::protocol::*;
use crate::wcce::CertTransBlob;
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Operation, Result, RpcError};
use dcom::{iunknown_interface, ObjectTable, OrpcResponse, PropertyResponse};
use std::sync::Arc;

/// A CA object served through ICertRequestD
#[async_trait]
pub trait CertRequestHandler: Send + Sync + 'static {
    async fn request(&self, ctx: &CallContext, request: RequestRequest) -> Result<RequestResponse>;

    async fn get_ca_cert(
        &self,
        _ctx: &CallContext,
        _request: GetCACertRequest,
    ) -> Result<PropertyResponse<CertTransBlob>> {
        Err(RpcError::NotImplemented(GetCACert::NAME))
    }

    async fn ping(&self, _ctx: &CallContext, _request: AuthorityRequest) -> Result<OrpcResponse> {
        Ok(OrpcResponse::default())
    }
}

/// ICertRequestD server over an object table
///
/// Each call is routed to the object exported under the call's IPID.
pub struct CertRequestServer<T: ?Sized = dyn CertRequestHandler> {
    objects: Arc<ObjectTable<T>>,
}

impl<T: CertRequestHandler + ?Sized> CertRequestServer<T> {
    pub fn new(objects: Arc<ObjectTable<T>>) -> Self {
        Self { objects }
    }

    /// Build the DCE RPC interface on top of IUnknown
    pub fn build_interface(&self) -> Interface {
        let request = Arc::clone(&self.objects);
        let get_ca_cert = Arc::clone(&self.objects);
        let ping = Arc::clone(&self.objects);

        InterfaceBuilder::derived("ICertRequestD", ICERT_REQUEST_D_SYNTAX, iunknown_interface())
            .typed::<Request, _, _>(move |ctx, req| {
                let objects = Arc::clone(&request);
                async move { objects.resolve(&ctx, Request::NAME)?.request(&ctx, req).await }
            })
            .typed::<GetCACert, _, _>(move |ctx, req| {
                let objects = Arc::clone(&get_ca_cert);
                async move { objects.resolve(&ctx, GetCACert::NAME)?.get_ca_cert(&ctx, req).await }
            })
            .typed::<Ping, _, _>(move |ctx, req| {
                let objects = Arc::clone(&ping);
                async move { objects.resolve(&ctx, Ping::NAME)?.ping(&ctx, req).await }
            })
            .build()
    }

    /// Register with a DCE RPC server
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        server.register_interface(self.build_interface()).await
    }
}
