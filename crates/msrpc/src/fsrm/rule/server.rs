//! IFsrmRule server

use super::protocol::*;
use crate::fsrm::object::{FsrmObjectHandler, FsrmObjectServer};
use crate::fsrm::{completed, property, RuleType};
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Operation, Result, RpcError};
use dcom::ObjectTable;
use midl_ndr::unique_bstr;
use std::sync::Arc;

/// An FSRM rule; unimplemented properties answer "not implemented"
#[async_trait]
pub trait FsrmRuleHandler: FsrmObjectHandler {
    async fn name(&self, _ctx: &CallContext) -> Result<String> {
        Err(RpcError::NotImplemented(GetName::NAME))
    }

    async fn set_name(&self, _ctx: &CallContext, _name: String) -> Result<()> {
        Err(RpcError::NotImplemented(SetName::NAME))
    }

    async fn rule_type(&self, _ctx: &CallContext) -> Result<RuleType> {
        Err(RpcError::NotImplemented(GetRuleType::NAME))
    }

    async fn module_definition_name(&self, _ctx: &CallContext) -> Result<String> {
        Err(RpcError::NotImplemented(GetModuleDefinitionName::NAME))
    }

    async fn set_module_definition_name(&self, _ctx: &CallContext, _name: String) -> Result<()> {
        Err(RpcError::NotImplemented(SetModuleDefinitionName::NAME))
    }

    async fn rule_flags(&self, _ctx: &CallContext) -> Result<i32> {
        Err(RpcError::NotImplemented(GetRuleFlags::NAME))
    }

    async fn set_rule_flags(&self, _ctx: &CallContext, _flags: i32) -> Result<()> {
        Err(RpcError::NotImplemented(SetRuleFlags::NAME))
    }

    async fn last_modified(&self, _ctx: &CallContext) -> Result<f64> {
        Err(RpcError::NotImplemented(GetLastModified::NAME))
    }
}

/// IFsrmRule server over an object table
pub struct FsrmRuleServer<T: ?Sized = dyn FsrmRuleHandler> {
    objects: Arc<ObjectTable<T>>,
}

impl<T: FsrmRuleHandler + ?Sized> FsrmRuleServer<T> {
    pub fn new(objects: Arc<ObjectTable<T>>) -> Self {
        Self { objects }
    }

    /// Build the DCE RPC interface on top of IFsrmObject
    pub fn build_interface(&self) -> Interface {
        let base = FsrmObjectServer::new(Arc::clone(&self.objects)).build_interface();
        let name = Arc::clone(&self.objects);
        let set_name = Arc::clone(&self.objects);
        let rule_type = Arc::clone(&self.objects);
        let module = Arc::clone(&self.objects);
        let set_module = Arc::clone(&self.objects);
        let flags = Arc::clone(&self.objects);
        let set_flags = Arc::clone(&self.objects);
        let last_modified = Arc::clone(&self.objects);

        InterfaceBuilder::derived("IFsrmRule", IFSRM_RULE_SYNTAX, Arc::new(base))
            .typed::<GetName, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&name);
                async move {
                    let object = objects.resolve(&ctx, GetName::NAME)?;
                    property(object.name(&ctx).await.map(|name| unique_bstr(&name)))
                }
            })
            .typed::<SetName, _, _>(move |ctx, req| {
                let objects = Arc::clone(&set_name);
                async move {
                    let object = objects.resolve(&ctx, SetName::NAME)?;
                    completed(object.set_name(&ctx, req.value.into_string()).await)
                }
            })
            .typed::<GetRuleType, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&rule_type);
                async move { property(objects.resolve(&ctx, GetRuleType::NAME)?.rule_type(&ctx).await) }
            })
            .typed::<GetModuleDefinitionName, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&module);
                async move {
                    let object = objects.resolve(&ctx, GetModuleDefinitionName::NAME)?;
                    property(object.module_definition_name(&ctx).await.map(|name| unique_bstr(&name)))
                }
            })
            .typed::<SetModuleDefinitionName, _, _>(move |ctx, req| {
                let objects = Arc::clone(&set_module);
                async move {
                    let object = objects.resolve(&ctx, SetModuleDefinitionName::NAME)?;
                    completed(object.set_module_definition_name(&ctx, req.value.into_string()).await)
                }
            })
            .declare(opnum::GET_NAMESPACE_ROOTS, "GetNamespaceRoots")
            .declare(opnum::SET_NAMESPACE_ROOTS, "SetNamespaceRoots")
            .typed::<GetRuleFlags, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&flags);
                async move { property(objects.resolve(&ctx, GetRuleFlags::NAME)?.rule_flags(&ctx).await) }
            })
            .typed::<SetRuleFlags, _, _>(move |ctx, req| {
                let objects = Arc::clone(&set_flags);
                async move {
                    let object = objects.resolve(&ctx, SetRuleFlags::NAME)?;
                    completed(object.set_rule_flags(&ctx, req.value).await)
                }
            })
            .declare(opnum::GET_PARAMETERS, "GetParameters")
            .declare(opnum::SET_PARAMETERS, "SetParameters")
            .typed::<GetLastModified, _, _>(move |ctx, _req| {
                let objects = Arc::clone(&last_modified);
                async move {
                    let object = objects.resolve(&ctx, GetLastModified::NAME)?;
                    property(object.last_modified(&ctx).await)
                }
            })
            .build()
    }

    /// Register IFsrmRule together with its IFsrmObject view of the same objects
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        FsrmObjectServer::new(Arc::clone(&self.objects))
            .register(server)
            .await;
        server.register_interface(self.build_interface()).await
    }
}
