//! IFsrmClassificationRule server

use super::protocol::*;
use crate::fsrm::rule::{FsrmRuleHandler, FsrmRuleServer};
use crate::fsrm::{completed, property, ExecutionOption};
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Interface, InterfaceBuilder, Operation, Result, RpcError};
use dcom::ObjectTable;
use midl_ndr::unique_bstr;
use std::sync::Arc;

/// An FSRM classification rule
#[async_trait]
pub trait ClassificationRuleHandler: FsrmRuleHandler {
    async fn execution_option(&self, _ctx: &CallContext) -> Result<ExecutionOption> {
        Err(RpcError::NotImplemented(GetExecutionOption::NAME))
    }

    async fn set_execution_option(&self, _ctx: &CallContext, _option: ExecutionOption) -> Result<()> {
        Err(RpcError::NotImplemented(SetExecutionOption::NAME))
    }

    async fn property_affected(&self, _ctx: &CallContext) -> Result<String> {
        Err(RpcError::NotImplemented(GetPropertyAffected::NAME))
    }

    async fn set_property_affected(&self, _ctx: &CallContext, _property: String) -> Result<()> {
        Err(RpcError::NotImplemented(SetPropertyAffected::NAME))
    }

    async fn value(&self, _ctx: &CallContext) -> Result<String> {
        Err(RpcError::NotImplemented(GetValue::NAME))
    }

    async fn set_value(&self, _ctx: &CallContext, _value: String) -> Result<()> {
        Err(RpcError::NotImplemented(SetValue::NAME))
    }
}

/// IFsrmClassificationRule server over an object table
pub struct ClassificationRuleServer {
    objects: Arc<ObjectTable<dyn ClassificationRuleHandler>>,
}

impl ClassificationRuleServer {
    pub fn new(objects: Arc<ObjectTable<dyn ClassificationRuleHandler>>) -> Self {
        Self { objects }
    }

    /// Build the DCE RPC interface on top of IFsrmRule
    pub fn build_interface(&self) -> Interface {
        let base = FsrmRuleServer::new(Arc::clone(&self.objects)).build_interface();
        let option = Arc::clone(&self.objects);
        let set_option = Arc::clone(&self.objects);
        let affected = Arc::clone(&self.objects);
        let set_affected = Arc::clone(&self.objects);
        let value = Arc::clone(&self.objects);
        let set_value = Arc::clone(&self.objects);

        InterfaceBuilder::derived(
            "IFsrmClassificationRule",
            IFSRM_CLASSIFICATION_RULE_SYNTAX,
            Arc::new(base),
        )
        .typed::<GetExecutionOption, _, _>(move |ctx, _req| {
            let objects = Arc::clone(&option);
            async move {
                let object = objects.resolve(&ctx, GetExecutionOption::NAME)?;
                property(object.execution_option(&ctx).await)
            }
        })
        .typed::<SetExecutionOption, _, _>(move |ctx, req| {
            let objects = Arc::clone(&set_option);
            async move {
                let object = objects.resolve(&ctx, SetExecutionOption::NAME)?;
                completed(object.set_execution_option(&ctx, req.value).await)
            }
        })
        .typed::<GetPropertyAffected, _, _>(move |ctx, _req| {
            let objects = Arc::clone(&affected);
            async move {
                let object = objects.resolve(&ctx, GetPropertyAffected::NAME)?;
                property(object.property_affected(&ctx).await.map(|p| unique_bstr(&p)))
            }
        })
        .typed::<SetPropertyAffected, _, _>(move |ctx, req| {
            let objects = Arc::clone(&set_affected);
            async move {
                let object = objects.resolve(&ctx, SetPropertyAffected::NAME)?;
                completed(object.set_property_affected(&ctx, req.value.into_string()).await)
            }
        })
        .typed::<GetValue, _, _>(move |ctx, _req| {
            let objects = Arc::clone(&value);
            async move {
                let object = objects.resolve(&ctx, GetValue::NAME)?;
                property(object.value(&ctx).await.map(|v| unique_bstr(&v)))
            }
        })
        .typed::<SetValue, _, _>(move |ctx, req| {
            let objects = Arc::clone(&set_value);
            async move {
                let object = objects.resolve(&ctx, SetValue::NAME)?;
                completed(object.set_value(&ctx, req.value.into_string()).await)
            }
        })
        .build()
    }

    /// Register the whole chain: IFsrmObject, IFsrmRule and IFsrmClassificationRule
    pub async fn register(&self, server: &DceRpcServer) -> Arc<Interface> {
        FsrmRuleServer::new(Arc::clone(&self.objects))
            .register(server)
            .await;
        server.register_interface(self.build_interface()).await
    }
}
