//! ICertRequestD2 server

use super::protocol::*;
use crate::wcce::certrequest::{AuthorityRequest, CertRequestHandler, CertRequestServer};
use crate::wcce::CertTransBlob;
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Operation, Result, RpcError};
use dcom::{ObjectTable, OrpcResponse, PropertyResponse};
use std::sync::Arc;

/// A CA object served through ICertRequestD2 and, by inheritance, ICertRequestD
#[async_trait]
pub trait CertRequest2Handler: CertRequestHandler {
    async fn request2(&self, ctx: &CallContext, request: Request2Request) -> Result<Request2Response>;

    async fn get_ca_property(
        &self,
        ctx: &CallContext,
        request: GetCAPropertyRequest,
    ) -> Result<PropertyResponse<CertTransBlob>>;

    async fn get_ca_property_info(
        &self,
        _ctx: &CallContext,
        _request: AuthorityRequest,
    ) -> Result<GetCAPropertyInfoResponse> {
        Err(RpcError::NotImplemented(GetCAPropertyInfo::NAME))
    }

    async fn ping2(&self, _ctx: &CallContext, _request: AuthorityRequest) -> Result<OrpcResponse> {
        Ok(OrpcResponse::default())
    }
}

/// ICertRequestD2 server over an object table
pub struct CertRequest2Server {
    objects: Arc<ObjectTable<dyn CertRequest2Handler>>,
}

impl CertRequest2Server {
    pub fn new(objects: Arc<ObjectTable<dyn CertRequest2Handler>>) -> Self {
        Self { objects }
    }

    /// Build the DCE RPC interface on top of ICertRequestD
    pub fn build_interface(&self) -> Interface {
        let base = CertRequestServer::new(Arc::clone(&self.objects)).build_interface();
        let request2 = Arc::clone(&self.objects);
        let property = Arc::clone(&self.objects);
        let property_info = Arc::clone(&self.objects);
        let ping2 = Arc::clone(&self.objects);

        InterfaceBuilder::derived("ICertRequestD2", ICERT_REQUEST_D2_SYNTAX, Arc::new(base))
            .typed::<Request2, _, _>(move |ctx, req| {
                let objects = Arc::clone(&request2);
                async move { objects.resolve(&ctx, Request2::NAME)?.request2(&ctx, req).await }
            })
            .typed::<GetCAProperty, _, _>(move |ctx, req| {
                let objects = Arc::clone(&property);
                async move {
                    objects
                        .resolve(&ctx, GetCAProperty::NAME)?
                        .get_ca_property(&ctx, req)
                        .await
                }
            })
            .typed::<GetCAPropertyInfo, _, _>(move |ctx, req| {
                let objects = Arc::clone(&property_info);
                async move {
                    objects
                        .resolve(&ctx, GetCAPropertyInfo::NAME)?
                        .get_ca_property_info(&ctx, req)
                        .await
                }
            })
            .typed::<Ping2, _, _>(move |ctx, req| {
                let objects = Arc::clone(&ping2);
                async move { objects.resolve(&ctx, Ping2::NAME)?.ping2(&ctx, req).await }
            })
            .build()
    }

    /// Register ICertRequestD2 and its ICertRequestD view of the same objects
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        CertRequestServer::new(Arc::clone(&self.objects))
            .register(server)
            .await;
        server.register_interface(self.build_interface()).await
    }
}
