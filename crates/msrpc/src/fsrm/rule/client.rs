//! IFsrmRule client

use super::protocol::*;
use crate::fsrm::object::FsrmObjectClient;
use crate::fsrm::RuleType;
use dcerpc::{Connection, ContextOptions, Result, Transport};
use dcom::{CallOptions, DcomClient, Ipid, OrpcRequest, PropertyRequest};
use midl_ndr::unique_bstr;
use std::sync::Arc;

/// IFsrmRule proxy; [`FsrmRuleClient::object`] reaches the IFsrmObject operations
#[derive(Clone, Debug)]
pub struct FsrmRuleClient {
    object: FsrmObjectClient,
    dcom: DcomClient,
}

impl FsrmRuleClient {
    /// Bind IFsrmRule through `transport`
    pub async fn bind(transport: &dyn Transport) -> Result<Self> {
        Ok(Self::from_dcom(DcomClient::bind(transport, IFSRM_RULE_SYNTAX).await?))
    }

    pub fn from_dcom(dcom: DcomClient) -> Self {
        Self {
            object: FsrmObjectClient::from_dcom(DcomClient::superclass(&dcom)),
            dcom,
        }
    }

    /// The IFsrmObject proxy sharing this binding
    pub fn object(&self) -> &FsrmObjectClient {
        &self.object
    }

    pub fn dcom(&self) -> &DcomClient {
        &self.dcom
    }

    /// A copy of this proxy and its base addressed to `ipid`
    pub fn with_ipid(&self, ipid: Ipid) -> Self {
        Self {
            object: self.object.with_ipid(ipid),
            dcom: self.dcom.with_ipid(ipid),
        }
    }

    pub fn conn(&self) -> &Arc<dyn Connection> {
        self.dcom.conn()
    }

    pub async fn alter_context(&self, options: ContextOptions) -> Result<()> {
        self.dcom.alter_context(options).await
    }

    pub async fn name(&self) -> Result<String> {
        let response = self
            .dcom
            .invoke::<GetName>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value.into_string())
    }

    pub async fn set_name(&self, name: &str) -> Result<()> {
        self.dcom
            .invoke::<SetName>(PropertyRequest::new(unique_bstr(name)), &CallOptions::new())
            .await?;
        Ok(())
    }

    pub async fn rule_type(&self) -> Result<RuleType> {
        let response = self
            .dcom
            .invoke::<GetRuleType>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value)
    }

    pub async fn module_definition_name(&self) -> Result<String> {
        let response = self
            .dcom
            .invoke::<GetModuleDefinitionName>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value.into_string())
    }

    pub async fn set_module_definition_name(&self, name: &str) -> Result<()> {
        self.dcom
            .invoke::<SetModuleDefinitionName>(PropertyRequest::new(unique_bstr(name)), &CallOptions::new())
            .await?;
        Ok(())
    }

    pub async fn rule_flags(&self) -> Result<i32> {
        let response = self
            .dcom
            .invoke::<GetRuleFlags>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value)
    }

    pub async fn set_rule_flags(&self, flags: i32) -> Result<()> {
        self.dcom
            .invoke::<SetRuleFlags>(PropertyRequest::new(flags), &CallOptions::new())
            .await?;
        Ok(())
    }

    /// Last modification time as an OLE Automation date
    pub async fn last_modified(&self) -> Result<f64> {
        let response = self
            .dcom
            .invoke::<GetLastModified>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value)
    }
}
