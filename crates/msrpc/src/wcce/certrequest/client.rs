//! ICertRequestD client

use super::protocol::*;
use crate::wcce::CertTransBlob;
use dcerpc::{Connection, ContextOptions, Result, Transport};
use dcom::{CallOptions, DcomClient, Ipid};
use std::sync::Arc;
use tracing::debug;

/// ICertRequestD proxy
#[derive(Clone, Debug)]
pub struct CertRequestClient {
    dcom: DcomClient,
}

impl CertRequestClient {
    /// Bind ICertRequestD through `transport`
    pub async fn bind(transport: &dyn Transport) -> Result<Self> {
        Ok(Self::from_dcom(DcomClient::bind(transport, ICERT_REQUEST_D_SYNTAX).await?))
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

    /// Submit a certificate request, or retrieve a pending one by ID
    pub async fn request(&self, request: RequestRequest) -> Result<RequestResponse> {
        let response = self.dcom.invoke::<Request>(request, &CallOptions::new()).await?;
        debug!(
            "Request {} disposition {}",
            response.request_id, response.disposition
        );
        Ok(response)
    }

    /// Fetch the CA certificate or chain selected by `chain`
    pub async fn get_ca_cert(&self, chain: u32, authority: &str) -> Result<CertTransBlob> {
        let response = self
            .dcom
            .invoke::<GetCACert>(GetCACertRequest::new(chain, authority), &CallOptions::new())
            .await?;
        Ok(response.value)
    }

    pub async fn ping(&self, authority: &str) -> Result<()> {
        self.dcom
            .invoke::<Ping>(AuthorityRequest::new(authority), &CallOptions::new())
            .await?;
        Ok(())
    }
}
