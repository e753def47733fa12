//! ICertPassage wire protocol

use crate::wcce::{CertTransBlob, MAX_AUTHORITY_LEN};
use dcerpc::{check_utf16_len, Message, ReturnCode, StatusCode, SyntaxId, Violation};
use midl_ndr::{unique_wstring, NdrReader, NdrWriter, Unique, WString};

/// ICertPassage syntax (91ae6020-9e3c-11cf-8d7c-00aa00c091be v0.0)
pub const ICERT_PASSAGE_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0x91ae6020_9e3c_11cf_8d7c_00aa00c091be, 0, 0);

/// Operation numbers for ICertPassage
pub mod opnum {
    pub const CERT_SERVER_REQUEST: u16 = 0;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertServerRequestRequest {
    pub flags: u32,
    pub authority: Unique<WString>,
    pub request_id: u32,
    /// Null-terminated UTF-16 attribute string; `cb` includes the terminator
    pub attributes: CertTransBlob,
    pub request: CertTransBlob,
}

impl CertServerRequestRequest {
    pub fn new(authority: &str, attributes: &str, request: CertTransBlob) -> Self {
        Self {
            flags: 0,
            authority: unique_wstring(authority),
            request_id: 0,
            attributes: if attributes.is_empty() {
                CertTransBlob::default()
            } else {
                CertTransBlob::from_string(attributes)
            },
            request,
        }
    }

    /// The attribute string; an empty blob is an empty string
    pub fn attributes(&self) -> midl_ndr::Result<String> {
        self.attributes.to_utf16_string()
    }
}

impl Message for CertServerRequestRequest {
    fn validate(&self) -> Result<(), Violation> {
        check_utf16_len("Authority", self.authority.as_str(), MAX_AUTHORITY_LEN)
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write_u32(self.flags);
        w.write(&self.authority)?;
        w.write_u32(self.request_id);
        w.write(&self.attributes)?;
        w.write(&self.request)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            flags: r.read_u32()?,
            authority: r.read()?,
            request_id: r.read_u32()?,
            attributes: r.read()?,
            request: r.read()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertServerRequestResponse {
    pub request_id: u32,
    pub disposition: u32,
    pub cert: CertTransBlob,
    pub encoded_cert: CertTransBlob,
    pub disposition_message: CertTransBlob,
    pub status: StatusCode,
}

impl Message for CertServerRequestResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write_u32(self.request_id);
        w.write_u32(self.disposition);
        w.write(&self.cert)?;
        w.write(&self.encoded_cert)?;
        w.write(&self.disposition_message)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            request_id: r.read_u32()?,
            disposition: r.read_u32()?,
            cert: r.read()?,
            encoded_cert: r.read()?,
            disposition_message: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for CertServerRequestResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

dcerpc::operation!(
    CertServerRequest,
    opnum::CERT_SERVER_REQUEST,
    CertServerRequestRequest,
    CertServerRequestResponse
);
