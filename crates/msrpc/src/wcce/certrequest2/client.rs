//! ICertRequestD2 client

use super::protocol::*;
use crate::wcce::certrequest::{AuthorityRequest, CertRequestClient};
use crate::wcce::CertTransBlob;
use dcerpc::{Connection, ContextOptions, Result, Transport};
use dcom::{CallOptions, DcomClient, Ipid};
use std::sync::Arc;

/// ICertRequestD2 proxy; [`CertRequest2Client::cert_request`] reaches the base operations
#[derive(Clone, Debug)]
pub struct CertRequest2Client {
    base: CertRequestClient,
    dcom: DcomClient,
}

impl CertRequest2Client {
    /// Bind ICertRequestD2 through `transport`
    pub async fn bind(transport: &dyn Transport) -> Result<Self> {
        Ok(Self::from_dcom(DcomClient::bind(transport, ICERT_REQUEST_D2_SYNTAX).await?))
    }

    pub fn from_dcom(dcom: DcomClient) -> Self {
        Self {
            base: CertRequestClient::from_dcom(DcomClient::superclass(&dcom)),
            dcom,
        }
    }

    /// The ICertRequestD proxy sharing this binding
    pub fn cert_request(&self) -> &CertRequestClient {
        &self.base
    }

    pub fn dcom(&self) -> &DcomClient {
        &self.dcom
    }

    /// A copy of this proxy and its base addressed to `ipid`
    pub fn with_ipid(&self, ipid: Ipid) -> Self {
        Self {
            base: self.base.with_ipid(ipid),
            dcom: self.dcom.with_ipid(ipid),
        }
    }

    pub fn conn(&self) -> &Arc<dyn Connection> {
        self.dcom.conn()
    }

    pub async fn alter_context(&self, options: ContextOptions) -> Result<()> {
        self.dcom.alter_context(options).await
    }

    pub async fn request2(&self, request: Request2Request) -> Result<Request2Response> {
        self.dcom.invoke::<Request2>(request, &CallOptions::new()).await
    }

    /// Read one CA property
    pub async fn get_ca_property(
        &self,
        authority: &str,
        prop_id: i32,
        prop_index: i32,
        prop_type: i32,
    ) -> Result<CertTransBlob> {
        let request = GetCAPropertyRequest::new(authority, prop_id, prop_index, prop_type);
        let response = self
            .dcom
            .invoke::<GetCAProperty>(request, &CallOptions::new())
            .await?;
        Ok(response.value)
    }

    /// The number of CA properties and their packed descriptions
    pub async fn get_ca_property_info(&self, authority: &str) -> Result<(i32, CertTransBlob)> {
        let response = self
            .dcom
            .invoke::<GetCAPropertyInfo>(AuthorityRequest::new(authority), &CallOptions::new())
            .await?;
        Ok((response.property_count, response.property_info))
    }

    pub async fn ping2(&self, authority: &str) -> Result<()> {
        self.dcom
            .invoke::<Ping2>(AuthorityRequest::new(authority), &CallOptions::new())
            .await?;
        Ok(())
    }
}
