//! IFsrmObject client

use super::protocol::*;
use dcerpc::{Connection, ContextOptions, Result, Transport};
use dcom::{CallOptions, DcomClient, Ipid, OrpcRequest, PropertyRequest};
use midl_ndr::{unique_bstr, Uuid};
use std::sync::Arc;

/// IFsrmObject proxy
#[derive(Clone, Debug)]
pub struct FsrmObjectClient {
    dcom: DcomClient,
}

impl FsrmObjectClient {
    /// Bind IFsrmObject through `transport`
    pub async fn bind(transport: &dyn Transport) -> Result<Self> {
        Ok(Self::from_dcom(DcomClient::bind(transport, IFSRM_OBJECT_SYNTAX).await?))
    }

    pub fn from_dcom(dcom: DcomClient) -> Self {
        Self { dcom }
    }

    pub fn dcom(&self) -> &DcomClient {
        &self.dcom
    }

    /// A copy of this proxy addressed to `ipid`
    pub fn with_ipid(&self, ipid: Ipid) -> Self {
        Self::from_dcom(self.dcom.with_ipid(ipid))
    }

    pub fn conn(&self) -> &Arc<dyn Connection> {
        self.dcom.conn()
    }

    pub async fn alter_context(&self, options: ContextOptions) -> Result<()> {
        self.dcom.alter_context(options).await
    }

    pub async fn id(&self) -> Result<Uuid> {
        let response = self
            .dcom
            .invoke::<GetId>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value)
    }

    pub async fn description(&self) -> Result<String> {
        let response = self
            .dcom
            .invoke::<GetDescription>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(response.value.into_string())
    }

    pub async fn set_description(&self, description: &str) -> Result<()> {
        self.dcom
            .invoke::<SetDescription>(PropertyRequest::new(unique_bstr(description)), &CallOptions::new())
            .await?;
        Ok(())
    }

    /// Mark the object for deletion; takes effect on commit
    pub async fn delete(&self) -> Result<()> {
        self.dcom
            .invoke::<Delete>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(())
    }

    pub async fn commit(&self) -> Result<()> {
        self.dcom
            .invoke::<Commit>(OrpcRequest::default(), &CallOptions::new())
            .await?;
        Ok(())
    }
}
