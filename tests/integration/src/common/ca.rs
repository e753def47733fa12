//! An in-memory certification authority served over WCCE and ICPR

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use dcerpc::{CallContext, DceRpcServer, Result, StatusCode};
use dcom::{Ipid, ObjectTable, OrpcThat, PropertyResponse};
use msrpc::icpr::{CertPassageHandler, CertPassageServer, CertServerRequestRequest, CertServerRequestResponse};
use msrpc::wcce::certrequest::{AuthorityRequest, CertRequestHandler, GetCACertRequest, RequestRequest, RequestResponse};
use msrpc::wcce::certrequest2::{
    CertRequest2Handler, CertRequest2Server, GetCAPropertyInfoResponse, GetCAPropertyRequest, Request2Request,
    Request2Response,
};
use msrpc::wcce::{disposition, prop, proptype, CertTransBlob};

/// DER bytes handed out as the CA certificate and as issued certificates
pub const CA_CERTIFICATE: &[u8] = b"\x30\x82\x01\x0a\x02\x82\x01\x01\x00\xc3";

/// One request as the CA saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub request_id: u32,
    pub attributes: String,
    pub request: Vec<u8>,
}

/// Issues every non-empty request and denies empty ones
pub struct TestCa {
    pub name: String,
    next_id: AtomicU32,
    pub submitted: Mutex<Vec<Submitted>>,
}

/// What a request ended as
struct Outcome {
    status: StatusCode,
    request_id: u32,
    disposition: u32,
    certificate: CertTransBlob,
    message: CertTransBlob,
}

impl TestCa {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            next_id: AtomicU32::new(1),
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn serves(&self, authority: &str) -> bool {
        authority.eq_ignore_ascii_case(&self.name)
    }

    fn submit(&self, authority: &str, attributes: String, request: &CertTransBlob) -> Outcome {
        if !self.serves(authority) {
            return Outcome {
                status: StatusCode::E_INVALIDARG,
                request_id: 0,
                disposition: disposition::ERROR,
                certificate: CertTransBlob::default(),
                message: CertTransBlob::from_string("unknown authority"),
            };
        }

        let request_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().push(Submitted {
            request_id,
            attributes,
            request: request.as_bytes().to_vec(),
        });

        if request.is_empty() {
            Outcome {
                status: StatusCode::S_OK,
                request_id,
                disposition: disposition::DENIED,
                certificate: CertTransBlob::default(),
                message: CertTransBlob::from_string("empty request"),
            }
        } else {
            Outcome {
                status: StatusCode::S_OK,
                request_id,
                disposition: disposition::ISSUED,
                certificate: CertTransBlob::new(CA_CERTIFICATE),
                message: CertTransBlob::from_string("Issued"),
            }
        }
    }

    fn property(&self, request: &GetCAPropertyRequest) -> std::result::Result<CertTransBlob, StatusCode> {
        if !self.serves(request.authority.as_str()) {
            return Err(StatusCode::E_INVALIDARG);
        }
        match (request.prop_id, request.prop_type) {
            (prop::CANAME, proptype::STRING) | (prop::SANITIZEDCANAME, proptype::STRING) => {
                Ok(CertTransBlob::from_string(&self.name))
            }
            (prop::CATYPE, proptype::LONG) => Ok(CertTransBlob::from_long(0)),
            (prop::CASIGCERTCOUNT, proptype::LONG) => Ok(CertTransBlob::from_long(1)),
            (prop::CASIGCERT, proptype::BINARY) if request.prop_index == 0 => Ok(CertTransBlob::new(CA_CERTIFICATE)),
            _ => Err(StatusCode::E_INVALIDARG),
        }
    }
}

fn property_response(result: std::result::Result<CertTransBlob, StatusCode>) -> PropertyResponse<CertTransBlob> {
    match result {
        Ok(blob) => PropertyResponse::ok(blob),
        Err(status) => PropertyResponse {
            that: OrpcThat::new(),
            value: CertTransBlob::default(),
            status,
        },
    }
}

#[async_trait]
impl CertRequestHandler for TestCa {
    async fn request(&self, _ctx: &CallContext, request: RequestRequest) -> Result<RequestResponse> {
        let attributes = request.attributes.as_str().to_string();
        let outcome = self.submit(request.authority.as_str(), attributes, &request.request);
        Ok(RequestResponse {
            that: OrpcThat::new(),
            request_id: outcome.request_id,
            disposition: outcome.disposition,
            cert_chain: outcome.certificate.clone(),
            encoded_cert: outcome.certificate,
            disposition_message: outcome.message,
            status: outcome.status,
        })
    }

    async fn get_ca_cert(&self, _ctx: &CallContext, request: GetCACertRequest) -> Result<PropertyResponse<CertTransBlob>> {
        if !self.serves(request.authority.as_str()) {
            return Ok(property_response(Err(StatusCode::E_INVALIDARG)));
        }
        Ok(property_response(Ok(CertTransBlob::new(CA_CERTIFICATE))))
    }
}

#[async_trait]
impl CertRequest2Handler for TestCa {
    async fn request2(&self, _ctx: &CallContext, request: Request2Request) -> Result<Request2Response> {
        let attributes = request.attributes.as_str().to_string();
        let outcome = self.submit(request.authority.as_str(), attributes, &request.request);
        Ok(Request2Response {
            that: OrpcThat::new(),
            request_id: outcome.request_id,
            disposition: outcome.disposition,
            full_response: outcome.certificate.clone(),
            encoded_cert: outcome.certificate,
            disposition_message: outcome.message,
            status: outcome.status,
        })
    }

    async fn get_ca_property(
        &self,
        _ctx: &CallContext,
        request: GetCAPropertyRequest,
    ) -> Result<PropertyResponse<CertTransBlob>> {
        Ok(property_response(self.property(&request)))
    }

    async fn get_ca_property_info(
        &self,
        _ctx: &CallContext,
        request: AuthorityRequest,
    ) -> Result<GetCAPropertyInfoResponse> {
        if !self.serves(request.authority.as_str()) {
            return Ok(GetCAPropertyInfoResponse {
                status: StatusCode::E_INVALIDARG,
                ..GetCAPropertyInfoResponse::default()
            });
        }
        Ok(GetCAPropertyInfoResponse {
            that: OrpcThat::new(),
            property_count: 5,
            property_info: CertTransBlob::default(),
            status: StatusCode::S_OK,
        })
    }
}

#[async_trait]
impl CertPassageHandler for TestCa {
    async fn cert_server_request(
        &self,
        _ctx: &CallContext,
        request: CertServerRequestRequest,
    ) -> Result<CertServerRequestResponse> {
        let attributes = request.attributes()?;
        let outcome = self.submit(request.authority.as_str(), attributes, &request.request);
        Ok(CertServerRequestResponse {
            request_id: outcome.request_id,
            disposition: outcome.disposition,
            cert: outcome.certificate.clone(),
            encoded_cert: outcome.certificate,
            disposition_message: outcome.message,
            status: outcome.status,
        })
    }
}

/// Serve `ca` over ICertRequestD, ICertRequestD2 and ICertPassage
pub async fn serve(server: &DceRpcServer, ca: Arc<TestCa>) -> Ipid {
    let objects: Arc<ObjectTable<dyn CertRequest2Handler>> = Arc::new(ObjectTable::new());
    let ipid = objects.export(Arc::clone(&ca) as Arc<dyn CertRequest2Handler>);
    CertRequest2Server::new(objects).register(server).await;
    CertPassageServer::new(ca).register(server).await;
    ipid
}
