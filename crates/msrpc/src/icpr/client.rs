//! ICertPassage client

use super::protocol::*;
use dcerpc::{DceRpcClient, Result, Transport};
use tracing::debug;

/// ICertPassage client
#[derive(Clone, Debug)]
pub struct CertPassageClient {
    client: DceRpcClient,
}

impl CertPassageClient {
    /// Bind ICertPassage through `transport`
    pub async fn connect(transport: &dyn Transport) -> Result<Self> {
        let client = DceRpcClient::connect(transport, ICERT_PASSAGE_SYNTAX).await?;
        Ok(Self { client })
    }

    pub fn from_client(client: DceRpcClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DceRpcClient {
        &self.client
    }

    /// Submit a certificate request; a failing return code is an error
    pub async fn cert_server_request(&self, request: CertServerRequestRequest) -> Result<CertServerRequestResponse> {
        let response = self.client.invoke::<CertServerRequest>(None, request).await?;
        debug!(
            "CertServerRequest {} disposition {}",
            response.request_id, response.disposition
        );
        Ok(response)
    }
}
