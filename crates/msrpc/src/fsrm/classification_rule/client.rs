//! IFsrmClassificationRule client

use super::protocol::*;
use crate::fsrm::object::FsrmObjectClient;
use crate::fsrm::rule::FsrmRuleClient;
use crate::fsrm::ExecutionOption;
use dcerpc::{Connection, ContextOptions, Result, Transport};
use dcom::{CallOptions, DcomClient, Ipid, OrpcRequest, PropertyRequest};
use midl_ndr::unique_bstr;
use std::sync::Arc;

/// IFsrmClassificationRule proxy
///
/// Inherited operations are reached through [`rule`](Self::rule) and
/// [`object`](Self::object); all three share one binding.
#[derive(Clone, Debug)]
pub struct ClassificationRuleClient {
    rule: FsrmRuleClient,
    dcom: DcomClient,
}

impl ClassificationRuleClient {
    /// Bind IFsrmClassificationRule through `transport`
    pub async fn bind(transport: &dyn Transport) -> Result<Self> {
        Ok(Self::from_dcom(
            DcomClient::bind(transport, IFSRM_CLASSIFICATION_RULE_SYNTAX).await?,
        ))
    }

    pub fn from_dcom(dcom: DcomClient) -> Self {
        Self {
            rule: FsrmRuleClient::from_dcom(DcomClient::superclass(&dcom)),
            dcom,
        }
    }

    pub fn rule(&self) -> &FsrmRuleClient {
        &self.rule
    }

    pub fn object(&self) -> &FsrmObjectClient {
        self.rule.object()
    }

    pub fn dcom(&self) -> &DcomClient {
        &self.dcom
    }

    /// A copy of this proxy and its whole base chain addressed to `ipid`
    pub fn with_ipid(&self, ipid: Ipid) -> Self {
        Self {
            rule: self.rule.with_ipid(ipid),
            dcom: self.dcom.with_ipid(ipid),
        }
    }

    pub fn conn(&self) -> &Arc<dyn Connection> {
        self.dcom.conn()
    }

    pub async fn alter_context(&self, options: ContextOptions) -> Result<()> {
        self.dcom.alter_context(options).await
    }

    pub async fn execution_option(&self) -> Result<ExecutionOption> {
        let response = self
            .dcom
            .invoke::<GetExecutionOption>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value)
    }

    pub async fn set_execution_option(&self, option: ExecutionOption) -> Result<()> {
        self.dcom
            .invoke::<SetExecutionOption>(PropertyRequest::new(option), &CallOptions::new())
            .await?;
        Ok(())
    }

    /// Name of the classification property the rule sets
    pub async fn property_affected(&self) -> Result<String> {
        let response = self
            .dcom
            .invoke::<GetPropertyAffected>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value.into_string())
    }

    pub async fn set_property_affected(&self, property: &str) -> Result<()> {
        self.dcom
            .invoke::<SetPropertyAffected>(PropertyRequest::new(unique_bstr(property)), &CallOptions::new())
            .await?;
        Ok(())
    }

    pub async fn value(&self) -> Result<String> {
        let response = self
            .dcom
            .invoke::<GetValue>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value.into_string())
    }

    pub async fn set_value(&self, value: &str) -> Result<()> {
        self.dcom
            .invoke::<SetValue>(PropertyRequest::new(unique_bstr(value)), &CallOptions::new())
            .await?;
        Ok(())
    }
}
