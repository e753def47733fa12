//! Codec Tests - whole stubs as they appear on the wire
//!
//! These tests check complete request and response stubs:
//! - Unique string pointers and the null form of empty strings
//! - Alignment of fields that follow variable-length deferred data
//! - Length ceilings enforced before anything is written
//! - Declared sizes checked against the remaining buffer

mod common;

use common::*;
use dcerpc::{decode_message, encode_message, Operation, RpcError};
use dcom::PropertyResponse;
use midl_ndr::{NdrContext, Uuid, FIRST_REFERENT_ID};
use msrpc::icpr::{CertServerRequest, CertServerRequestRequest, CertServerRequestResponse};
use msrpc::pan::async_notify::RegisterClientRequest;
use msrpc::pan::{ConversationStyle, RemoteObjectHandle, UserFilter};
use msrpc::wcce::{CertTransBlob, MAX_AUTHORITY_LEN};

fn utf16z(s: &str) -> Vec<u8> {
    s.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

#[test]
fn test_present_authority_string() {
    init_logging();

    let request = CertServerRequestRequest::new("CA01", "", CertTransBlob::default());
    let stub = encode_message(CertServerRequest::NAME, request, NdrContext::new()).unwrap();
    println!("CertServerRequest stub:\n{}", hex_dump(&stub));

    assert_eq!(u32_at(&stub, 0), 0, "dwFlags");
    assert_eq!(u32_at(&stub, 4), FIRST_REFERENT_ID, "pwszAuthority presence");
    assert_eq!(u32_at(&stub, 8), 5, "max_count");
    assert_eq!(u32_at(&stub, 12), 0, "offset");
    assert_eq!(u32_at(&stub, 16), 5, "actual_count");
    assert_eq!(&stub[20..30], &utf16z("CA01")[..]);
    // pdwRequestId realigns to 4 after ten bytes of string data
    assert_eq!(&stub[30..32], &[0, 0]);
    assert_eq!(u32_at(&stub, 32), 0, "pdwRequestId");
    // both blobs are empty: cb = 0 and a null pointer each
    assert_eq!(&stub[36..], &[0u8; 16]);
}

#[test]
fn test_empty_authority_is_null_pointer() {
    init_logging();

    let request = CertServerRequestRequest::new("", "", CertTransBlob::default());
    let stub = encode_message(CertServerRequest::NAME, request, NdrContext::new()).unwrap();

    // flags, null authority, pdwRequestId, then two empty blobs of 8 bytes
    assert_eq!(stub.len(), 28, "\n{}", hex_dump(&stub));
    assert!(stub.iter().all(|b| *b == 0));

    let decoded: CertServerRequestRequest = decode_message(&stub, NdrContext::new()).unwrap();
    assert!(decoded.authority.is_null());
}

#[test]
fn test_authority_ceiling() {
    init_logging();

    let at_limit = "C".repeat(MAX_AUTHORITY_LEN);
    let request = CertServerRequestRequest::new(&at_limit, "", CertTransBlob::default());
    assert!(encode_message(CertServerRequest::NAME, request, NdrContext::new()).is_ok());

    let over_limit = "C".repeat(MAX_AUTHORITY_LEN + 1);
    let request = CertServerRequestRequest::new(&over_limit, "", CertTransBlob::default());
    let err = encode_message(CertServerRequest::NAME, request, NdrContext::new()).unwrap_err();
    assert!(matches!(err, RpcError::Validation { op: "CertServerRequest", .. }), "{}", err);
}

#[test]
fn test_field_alignment_after_strings() {
    init_logging();

    for name in ["A", "AB", "ABC", "ABCD"] {
        let mut request = CertServerRequestRequest::new(name, "", CertTransBlob::default());
        request.request_id = 0xdead_beef;
        let stub = encode_message(CertServerRequest::NAME, request, NdrContext::new()).unwrap();

        let string_end = 20 + 2 * (name.len() + 1);
        let offset = (string_end + 3) & !3;
        assert_eq!(u32_at(&stub, offset), 0xdead_beef, "name {:?}\n{}", name, hex_dump(&stub));
        assert!(stub[string_end..offset].iter().all(|b| *b == 0));
    }
}

#[test]
fn test_request_round_trip_keeps_pointer_state() {
    init_logging();

    let request = CertServerRequestRequest::new("CA01", "CertificateTemplate:User", b"\x30\x82\x01\x0a".to_vec().into());
    let stub = encode_message(CertServerRequest::NAME, request.clone(), NdrContext::new()).unwrap();
    let decoded: CertServerRequestRequest = decode_message(&stub, NdrContext::new()).unwrap();

    assert_eq!(decoded, request);
    assert_eq!(decoded.attributes().unwrap(), "CertificateTemplate:User");
    assert_eq!(decoded.request.as_bytes(), b"\x30\x82\x01\x0a");

    let registration = RegisterClientRequest::new(
        RemoteObjectHandle::generate(),
        "",
        Uuid::new_v4(),
        UserFilter::AllUsers,
        ConversationStyle::Unidirectional,
    );
    let stub = encode_message("RegisterClient", registration.clone(), NdrContext::new()).unwrap();
    let decoded: RegisterClientRequest = decode_message(&stub, NdrContext::new()).unwrap();
    assert!(decoded.name.is_null());
    assert_eq!(decoded, registration);
}

#[test]
fn test_ca_name_property_blob() {
    init_logging();

    let response = PropertyResponse::ok(CertTransBlob::from_string("CA01"));
    let stub = encode_message("GetCAProperty", response, NdrContext::new()).unwrap();
    println!("GetCAProperty response stub:\n{}", hex_dump(&stub));

    // ORPCTHAT: flags and a null extension pointer
    assert_eq!(&stub[0..8], &[0u8; 8]);
    assert_eq!(u32_at(&stub, 8), 10, "cb");
    assert_eq!(u32_at(&stub, 12), FIRST_REFERENT_ID);
    assert_eq!(u32_at(&stub, 16), 10, "max_count");
    assert_eq!(&stub[20..30], &utf16z("CA01")[..]);

    let decoded: PropertyResponse<CertTransBlob> = decode_message(&stub, NdrContext::new()).unwrap();
    assert_eq!(decoded.value.len(), 10);
    assert_eq!(decoded.value.to_utf16_string().unwrap(), "CA01");
    assert!(decoded.status.is_success());
}

#[test]
fn test_declared_size_beyond_buffer() {
    init_logging();

    let mut stub = Vec::new();
    stub.extend_from_slice(&0u32.to_le_bytes()); // request id
    stub.extend_from_slice(&3u32.to_le_bytes()); // disposition
    stub.extend_from_slice(&0xffff_fff0u32.to_le_bytes()); // cb
    stub.extend_from_slice(&FIRST_REFERENT_ID.to_le_bytes());
    stub.extend_from_slice(&0xffff_fff0u32.to_le_bytes()); // max_count
    stub.extend_from_slice(b"abcd");

    let err = decode_message::<CertServerRequestResponse>(&stub, NdrContext::new()).unwrap_err();
    assert!(matches!(err, RpcError::Ndr(_)), "{}", err);
}

#[test]
fn test_truncated_stub() {
    init_logging();

    let request = CertServerRequestRequest::new("CA01", "", CertTransBlob::default());
    let stub = encode_message(CertServerRequest::NAME, request, NdrContext::new()).unwrap();

    for len in [0, 3, 7, 19, 25, 35] {
        let err = decode_message::<CertServerRequestRequest>(&stub[..len], NdrContext::new()).unwrap_err();
        assert!(matches!(err, RpcError::Ndr(_)), "len {}: {}", len, err);
    }
}
