//! IFsrmObject server

use super::protocol::*;
use crate::fsrm::{completed, property};
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Operation, Result, RpcError};
use dcom::{idispatch_interface, ObjectTable};
use midl_ndr::{unique_bstr, Uuid};
use std::sync::Arc;

/// An FSRM object; every operation defaults to "not implemented"
#[async_trait]
pub trait FsrmObjectHandler: Send + Sync + 'static {
    async fn id(&self, _ctx: &CallContext) -> Result<Uuid> {
        Err(RpcError::NotImplemented(GetId::NAME))
    }

    async fn description(&self, _ctx: &CallContext) -> Result<String> {
        Err(RpcError::NotImplemented(GetDescription::NAME))
    }

    async fn set_description(&self, _ctx: &CallContext, _description: String) -> Result<()> {
        Err(RpcError::NotImplemented(SetDescription::NAME))
    }

    async fn delete(&self, _ctx: &CallContext) -> Result<()> {
        Err(RpcError::NotImplemented(Delete::NAME))
    }

    async fn commit(&self, _ctx: &CallContext) -> Result<()> {
        Err(RpcError::NotImplemented(Commit::NAME))
    }
}

/// IFsrmObject server over an object table
pub struct FsrmObjectServer<T: ?Sized = dyn FsrmObjectHandler> {
    objects: Arc<ObjectTable<T>>,
}

impl<T: FsrmObjectHandler + ?Sized> FsrmObjectServer<T> {
    pub fn new(objects: Arc<ObjectTable<T>>) -> Self {
        Self { objects }
    }

    /// Build the DCE RPC interface on top of IDispatch
    pub fn build_interface(&self) -> Interface {
        let id = Arc::clone(&self.objects);
        let description = Arc::clone(&self.objects);
        let set_description = Arc::clone(&self.objects);
        let delete = Arc::clone(&self.objects);
        let commit = Arc::clone(&self.objects);

        InterfaceBuilder::derived("IFsrmObject", IFSRM_OBJECT_SYNTAX, idispatch_interface())
            .typed::<GetId, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&id);
                async move { property(objects.resolve(&ctx, GetId::NAME)?.id(&ctx).await) }
            })
            .typed::<GetDescription, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&description);
                async move {
                    let object = objects.resolve(&ctx, GetDescription::NAME)?;
                    let description = object.description(&ctx).await;
                    property(description.map(|d| unique_bstr(&d)))
                }
            })
            .typed::<SetDescription, _, _>(move |ctx, req| {
                let objects = Arc::clone(&set_description);
                async move {
                    let object = objects.resolve(&ctx, SetDescription::NAME)?;
                    completed(object.set_description(&ctx, req.value.into_string()).await)
                }
            })
            .typed::<Delete, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&delete);
                async move { completed(objects.resolve(&ctx, Delete::NAME)?.delete(&ctx).await) }
            })
            .typed::<Commit, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&commit);
                async move { completed(objects.resolve(&ctx, Commit::NAME)?.commit(&ctx).await) }
            })
            .build()
    }

    /// Register with a DCE RPC server
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        server.register_interface(self.build_interface()).await
    }
}
