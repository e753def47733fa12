//! Enrollment Tests - MS-WCCE and MS-ICPR against an in-memory CA
//!
//! These tests exercise:
//! - ICertRequestD2 property reads and requests
//! - ICertRequestD reached through the derived proxy
//! - ICertPassage requests with attribute blobs
//! - Server status codes and local validation

mod common;

use std::sync::Arc;

use common::ca::{self, TestCa, CA_CERTIFICATE};
use common::*;
use dcerpc::{RpcError, StatusCode};
use midl_ndr::unique_wstring;
use msrpc::icpr::{CertPassageClient, CertServerRequestRequest};
use msrpc::wcce::certrequest::RequestRequest;
use msrpc::wcce::certrequest2::{CertRequest2Client, Request2Request};
use msrpc::wcce::{disposition, prop, proptype, CertTransBlob, MAX_SERIAL_NUMBER_LEN};

const CSR: &[u8] = b"\x30\x82\x02\x5a\x30\x82\x01\x42\x02\x01\x00";

struct Fixture {
    transport: dcerpc::LocalTransport,
    ca: Arc<TestCa>,
    wcce: CertRequest2Client,
}

async fn fixture() -> Fixture {
    init_logging();
    let (server, transport) = local_server();
    let ca = Arc::new(TestCa::new("CA01"));
    let ipid = ca::serve(&server, Arc::clone(&ca)).await;
    let wcce = CertRequest2Client::bind(&transport).await.unwrap().with_ipid(ipid);
    Fixture { transport, ca, wcce }
}

#[tokio::test]
async fn test_ca_name_property() {
    let fx = fixture().await;

    let blob = fx
        .wcce
        .get_ca_property("CA01", prop::CANAME, 0, proptype::STRING)
        .await
        .unwrap();
    assert_eq!(blob.len(), 10);
    assert_eq!(blob.to_utf16_string().unwrap(), "CA01");

    let ca_type = fx
        .wcce
        .get_ca_property("CA01", prop::CATYPE, 0, proptype::LONG)
        .await
        .unwrap();
    assert_eq!(ca_type.to_long(), Some(0));

    let signing = fx
        .wcce
        .get_ca_property("CA01", prop::CASIGCERT, 0, proptype::BINARY)
        .await
        .unwrap();
    assert_eq!(signing.as_bytes(), CA_CERTIFICATE);
}

#[tokio::test]
async fn test_property_errors_carry_status() {
    let fx = fixture().await;

    let wrong_type = fx
        .wcce
        .get_ca_property("CA01", prop::CANAME, 0, proptype::LONG)
        .await
        .unwrap_err();
    assert!(matches!(wrong_type, RpcError::Status { op: "GetCAProperty", .. }), "{}", wrong_type);
    assert_eq!(wrong_type.status(), Some(StatusCode::E_INVALIDARG));

    let other_ca = fx
        .wcce
        .get_ca_property("CA02", prop::CANAME, 0, proptype::STRING)
        .await
        .unwrap_err();
    assert_eq!(other_ca.status(), Some(StatusCode::E_INVALIDARG));
}

#[tokio::test]
async fn test_property_info_and_ping() {
    let fx = fixture().await;

    let (count, info) = fx.wcce.get_ca_property_info("CA01").await.unwrap();
    assert_eq!(count, 5);
    assert!(info.is_empty());

    fx.wcce.ping2("CA01").await.unwrap();
    fx.wcce.cert_request().ping("CA01").await.unwrap();
}

#[tokio::test]
async fn test_request2_issues_certificate() {
    let fx = fixture().await;

    let request = Request2Request::new("CA01", "CertificateTemplate:WebServer", CertTransBlob::new(CSR));
    let response = fx.wcce.request2(request).await.unwrap();

    assert_eq!(response.disposition, disposition::ISSUED);
    assert_eq!(response.encoded_cert.as_bytes(), CA_CERTIFICATE);
    assert_eq!(response.disposition_message.to_utf16_string().unwrap(), "Issued");

    let submitted = fx.ca.submitted.lock().clone();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].request_id, response.request_id);
    assert_eq!(submitted[0].attributes, "CertificateTemplate:WebServer");
    assert_eq!(submitted[0].request, CSR);
}

#[tokio::test]
async fn test_base_request_through_derived_proxy() {
    let fx = fixture().await;

    let denied = fx
        .wcce
        .cert_request()
        .request(RequestRequest::new("CA01", "", CertTransBlob::default()))
        .await
        .unwrap();
    assert_eq!(denied.disposition, disposition::DENIED);
    assert!(denied.encoded_cert.is_empty());
    assert_eq!(denied.disposition_message.to_utf16_string().unwrap(), "empty request");

    let issued = fx
        .wcce
        .cert_request()
        .request(RequestRequest::new("CA01", "", CertTransBlob::new(CSR)))
        .await
        .unwrap();
    assert_eq!(issued.disposition, disposition::ISSUED);
    assert!(issued.request_id > denied.request_id);
}

#[tokio::test]
async fn test_serial_number_ceiling() {
    let fx = fixture().await;

    let mut request = Request2Request::new("CA01", "", CertTransBlob::new(CSR));
    request.serial_number = unique_wstring(&"0".repeat(MAX_SERIAL_NUMBER_LEN + 1));
    let err = fx.wcce.request2(request).await.unwrap_err();
    assert!(matches!(err, RpcError::Validation { op: "Request2", .. }), "{}", err);
    assert!(fx.ca.submitted.lock().is_empty());

    let mut request = Request2Request::new("CA01", "", CertTransBlob::new(CSR));
    request.serial_number = unique_wstring(&"0".repeat(MAX_SERIAL_NUMBER_LEN));
    fx.wcce.request2(request).await.unwrap();
}

#[tokio::test]
async fn test_cert_passage_request() {
    let fx = fixture().await;
    let icpr = CertPassageClient::connect(&fx.transport).await.unwrap();

    let response = icpr
        .cert_server_request(CertServerRequestRequest::new(
            "CA01",
            "CertificateTemplate:User",
            CertTransBlob::new(CSR),
        ))
        .await
        .unwrap();
    assert_eq!(response.disposition, disposition::ISSUED);
    assert_eq!(response.cert.as_bytes(), CA_CERTIFICATE);

    let submitted = fx.ca.submitted.lock().clone();
    assert_eq!(submitted[0].attributes, "CertificateTemplate:User");
    assert_eq!(submitted[0].request, CSR);
}

#[tokio::test]
async fn test_cert_passage_unknown_authority() {
    let fx = fixture().await;
    let icpr = CertPassageClient::connect(&fx.transport).await.unwrap();

    let err = icpr
        .cert_server_request(CertServerRequestRequest::new("CA02", "", CertTransBlob::new(CSR)))
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Status { op: "CertServerRequest", .. }), "{}", err);
    assert_eq!(err.status(), Some(StatusCode::E_INVALIDARG));
    assert!(fx.ca.submitted.lock().is_empty());
}
