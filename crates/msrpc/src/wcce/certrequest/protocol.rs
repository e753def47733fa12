//! ICertRequestD wire protocol

use crate::wcce::{CertTransBlob, MAX_AUTHORITY_LEN};
use dcerpc::{check_utf16_len, Message, ReturnCode, StatusCode, SyntaxId, Violation};
use dcom::{OrpcResponse, OrpcThat, OrpcThis, PropertyResponse};
use midl_ndr::{unique_wstring, NdrReader, NdrWriter, Unique, WString};

/// ICertRequestD syntax (d99e6e70-fc88-11d0-b498-00a0c90312f3 v0.0)
pub const ICERT_REQUEST_D_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0xd99e6e70_fc88_11d0_b498_00a0c90312f3, 0, 0);

/// Operation numbers for ICertRequestD
pub mod opnum {
    pub const REQUEST: u16 = 3;
    pub const GET_CA_CERT: u16 = 4;
    pub const PING: u16 = 5;
}

/// A request carrying `ORPCTHIS` and the CA name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorityRequest {
    pub this: OrpcThis,
    pub authority: Unique<WString>,
}

impl AuthorityRequest {
    pub fn new(authority: &str) -> Self {
        Self {
            this: OrpcThis::new(),
            authority: unique_wstring(authority),
        }
    }
}

impl Message for AuthorityRequest {
    fn validate(&self) -> Result<(), Violation> {
        check_utf16_len("Authority", self.authority.as_str(), MAX_AUTHORITY_LEN)
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.this)?;
        w.write(&self.authority)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            this: r.read()?,
            authority: r.read()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestRequest {
    pub this: OrpcThis,
    pub flags: u32,
    pub authority: Unique<WString>,
    /// Zero for a new request, or the ID of a pending request to retrieve
    pub request_id: u32,
    pub attributes: Unique<WString>,
    pub request: CertTransBlob,
}

impl RequestRequest {
    pub fn new(authority: &str, attributes: &str, request: CertTransBlob) -> Self {
        Self {
            this: OrpcThis::new(),
            flags: 0,
            authority: unique_wstring(authority),
            request_id: 0,
            attributes: unique_wstring(attributes),
            request,
        }
    }
}

impl Message for RequestRequest {
    fn validate(&self) -> Result<(), Violation> {
        check_utf16_len("Authority", self.authority.as_str(), MAX_AUTHORITY_LEN)?;
        check_utf16_len("Attributes", self.attributes.as_str(), MAX_AUTHORITY_LEN)
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.this)?;
        w.write_u32(self.flags);
        w.write(&self.authority)?;
        w.write_u32(self.request_id);
        w.write(&self.attributes)?;
        w.write(&self.request)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            this: r.read()?,
            flags: r.read_u32()?,
            authority: r.read()?,
            request_id: r.read_u32()?,
            attributes: r.read()?,
            request: r.read()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestResponse {
    pub that: OrpcThat,
    pub request_id: u32,
    /// One of [`disposition`](crate::wcce::disposition)
    pub disposition: u32,
    pub cert_chain: CertTransBlob,
    pub encoded_cert: CertTransBlob,
    pub disposition_message: CertTransBlob,
    pub status: StatusCode,
}

impl Message for RequestResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.that)?;
        w.write_u32(self.request_id);
        w.write_u32(self.disposition);
        w.write(&self.cert_chain)?;
        w.write(&self.encoded_cert)?;
        w.write(&self.disposition_message)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            that: r.read()?,
            request_id: r.read_u32()?,
            disposition: r.read_u32()?,
            cert_chain: r.read()?,
            encoded_cert: r.read()?,
            disposition_message: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for RequestResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCACertRequest {
    pub this: OrpcThis,
    /// Which CA certificate or chain to return
    pub chain: u32,
    pub authority: Unique<WString>,
}

impl GetCACertRequest {
    pub fn new(chain: u32, authority: &str) -> Self {
        Self {
            this: OrpcThis::new(),
            chain,
            authority: unique_wstring(authority),
        }
    }
}

impl Message for GetCACertRequest {
    fn validate(&self) -> Result<(), Violation> {
        check_utf16_len("Authority", self.authority.as_str(), MAX_AUTHORITY_LEN)
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.this)?;
        w.write_u32(self.chain);
        w.write(&self.authority)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            this: r.read()?,
            chain: r.read_u32()?,
            authority: r.read()?,
        })
    }
}

dcerpc::operation!(Request, opnum::REQUEST, RequestRequest, RequestResponse);
dcerpc::operation!(GetCACert, opnum::GET_CA_CERT, GetCACertRequest, PropertyResponse<CertTransBlob>);
dcerpc::operation!(Ping, opnum::PING, AuthorityRequest, OrpcResponse);
