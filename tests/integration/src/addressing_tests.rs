//! Addressing Tests - IPIDs, superclass bindings and context alteration
//!
//! These tests exercise:
//! - Calls that fail locally when no IPID is known
//! - Per-call IPIDs overriding the proxy's default
//! - Base interface proxies sharing the derived proxy's binding
//! - Alter-context on a live binding
//! - Bind negotiation on syntax versions

mod common;

use std::sync::Arc;

use common::ca::{self, TestCa};
use common::*;
use dcerpc::{ContextOptions, DataRepresentation, RpcError, SyntaxId};
use dcom::{hresult, CallOptions, Ipid};
use msrpc::wcce::certrequest::{AuthorityRequest, CertRequestClient};
use msrpc::wcce::certrequest2::{CertRequest2Client, GetCAProperty, GetCAPropertyRequest, Ping2, ICERT_REQUEST_D2_SYNTAX};
use msrpc::wcce::{prop, proptype};

async fn ca_fixture() -> (dcerpc::LocalTransport, Ipid) {
    init_logging();
    let (server, transport) = local_server();
    let ipid = ca::serve(&server, Arc::new(TestCa::new("CA01"))).await;
    (transport, ipid)
}

#[tokio::test]
async fn test_missing_ipid_fails_before_sending() {
    let (transport, _ipid) = ca_fixture().await;
    let client = CertRequest2Client::bind(&transport).await.unwrap();
    let before = transport.server().stats().snapshot();

    let err = client.ping2("CA01").await.unwrap_err();
    assert!(matches!(err, RpcError::MissingIpid("Ping2")), "{}", err);

    // the inherited proxy has no IPID either
    let err = client.cert_request().ping("CA01").await.unwrap_err();
    assert!(matches!(err, RpcError::MissingIpid("Ping")), "{}", err);

    let after = transport.server().stats().snapshot();
    assert_eq!(after.requests_received, before.requests_received);
}

#[tokio::test]
async fn test_per_call_ipid() {
    let (transport, ipid) = ca_fixture().await;
    let client = CertRequest2Client::bind(&transport).await.unwrap();

    let response = client
        .dcom()
        .invoke::<GetCAProperty>(
            GetCAPropertyRequest::new("CA01", prop::CANAME, 0, proptype::STRING),
            &CallOptions::with_ipid(ipid),
        )
        .await
        .unwrap();
    assert_eq!(response.value.to_utf16_string().unwrap(), "CA01");

    // a per-call IPID wins over the proxy's own
    let stale = client.with_ipid(Ipid::generate());
    stale
        .dcom()
        .invoke::<Ping2>(AuthorityRequest::new("CA01"), &CallOptions::with_ipid(ipid))
        .await
        .unwrap();
    let err = stale.ping2("CA01").await.unwrap_err();
    assert_eq!(err.status(), Some(hresult::CO_E_OBJNOTCONNECTED), "{}", err);
}

#[tokio::test]
async fn test_base_proxy_shares_binding() {
    let (transport, ipid) = ca_fixture().await;
    let client = CertRequest2Client::bind(&transport).await.unwrap().with_ipid(ipid);
    let binds = transport.server().stats().snapshot().binds_accepted;

    assert!(Arc::ptr_eq(client.conn(), client.cert_request().conn()));
    assert_eq!(client.conn().syntax(), ICERT_REQUEST_D2_SYNTAX);
    assert_eq!(client.cert_request().dcom().ipid(), Some(ipid));

    client.cert_request().ping("CA01").await.unwrap();
    client.ping2("CA01").await.unwrap();
    assert_eq!(transport.server().stats().snapshot().binds_accepted, binds);
}

#[tokio::test]
async fn test_base_interface_alone() {
    let (transport, ipid) = ca_fixture().await;
    let client = CertRequestClient::bind(&transport).await.unwrap().with_ipid(ipid);

    let certificate = client.get_ca_cert(0, "CA01").await.unwrap();
    assert_eq!(certificate.as_bytes(), ca::CA_CERTIFICATE);
}

#[tokio::test]
async fn test_alter_context_keeps_binding() {
    let (transport, ipid) = ca_fixture().await;
    let client = CertRequest2Client::bind(&transport).await.unwrap().with_ipid(ipid);
    let binds = transport.server().stats().snapshot().binds_accepted;

    client
        .alter_context(ContextOptions {
            data_representation: DataRepresentation::big_endian(),
        })
        .await
        .unwrap();
    assert!(!client.conn().data_representation().is_little_endian());

    let name = client
        .get_ca_property("CA01", prop::CANAME, 0, proptype::STRING)
        .await
        .unwrap();
    assert_eq!(name.to_utf16_string().unwrap(), "CA01");
    assert_eq!(
        client
            .get_ca_property("CA01", prop::CASIGCERTCOUNT, 0, proptype::LONG)
            .await
            .unwrap()
            .to_long(),
        Some(1)
    );
    assert_eq!(transport.server().stats().snapshot().binds_accepted, binds);
}

#[tokio::test]
async fn test_bind_version_negotiation() {
    let (transport, _ipid) = ca_fixture().await;
    let uuid = ICERT_REQUEST_D2_SYNTAX.uuid;

    let newer_minor = SyntaxId::new(uuid, 0, 1);
    let err = dcom::DcomClient::bind(&transport, newer_minor).await.unwrap_err();
    assert!(matches!(err, RpcError::VersionMismatch { .. }), "{}", err);

    let other_major = SyntaxId::new(uuid, 1, 0);
    assert!(dcom::DcomClient::bind(&transport, other_major).await.is_err());

    let unknown = SyntaxId::from_u128(0x1234_5678_0000_0000_0000_000000000000, 0, 0);
    let err = dcom::DcomClient::bind(&transport, unknown).await.unwrap_err();
    assert!(matches!(err, RpcError::InterfaceNotFound(_)), "{}", err);
}
