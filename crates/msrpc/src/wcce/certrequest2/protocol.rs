//! ICertRequestD2 wire protocol

use crate::wcce::certrequest::AuthorityRequest;
use crate::wcce::{CertTransBlob, MAX_AUTHORITY_LEN, MAX_SERIAL_NUMBER_LEN};
use dcerpc::{check_utf16_len, Message, ReturnCode, StatusCode, SyntaxId, Violation};
use dcom::{OrpcResponse, OrpcThat, OrpcThis, PropertyResponse};
use midl_ndr::{unique_wstring, NdrReader, NdrWriter, Unique, WString};

/// ICertRequestD2 syntax (5422fd3a-d4b8-4cef-a12e-e87d4ca22e90 v0.0)
pub const ICERT_REQUEST_D2_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0x5422fd3a_d4b8_4cef_a12e_e87d4ca22e90, 0, 0);

/// Operation numbers for ICertRequestD2
pub mod opnum {
    pub const REQUEST2: u16 = 6;
    pub const GET_CA_PROPERTY: u16 = 7;
    pub const GET_CA_PROPERTY_INFO: u16 = 8;
    pub const PING2: u16 = 9;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request2Request {
    pub this: OrpcThis,
    pub authority: Unique<WString>,
    pub flags: u32,
    /// Serial number of a certificate to renew or retrieve
    pub serial_number: Unique<WString>,
    pub request_id: u32,
    pub attributes: Unique<WString>,
    pub request: CertTransBlob,
}

impl Request2Request {
    pub fn new(authority: &str, attributes: &str, request: CertTransBlob) -> Self {
        Self {
            this: OrpcThis::new(),
            authority: unique_wstring(authority),
            flags: 0,
            serial_number: Unique::null(),
            request_id: 0,
            attributes: unique_wstring(attributes),
            request,
        }
    }
}

impl Message for Request2Request {
    fn validate(&self) -> Result<(), Violation> {
        check_utf16_len("Authority", self.authority.as_str(), MAX_AUTHORITY_LEN)?;
        check_utf16_len("SerialNumber", self.serial_number.as_str(), MAX_SERIAL_NUMBER_LEN)?;
        check_utf16_len("Attributes", self.attributes.as_str(), MAX_AUTHORITY_LEN)
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.this)?;
        w.write(&self.authority)?;
        w.write_u32(self.flags);
        w.write(&self.serial_number)?;
        w.write_u32(self.request_id);
        w.write(&self.attributes)?;
        w.write(&self.request)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            this: r.read()?,
            authority: r.read()?,
            flags: r.read_u32()?,
            serial_number: r.read()?,
            request_id: r.read_u32()?,
            attributes: r.read()?,
            request: r.read()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request2Response {
    pub that: OrpcThat,
    pub request_id: u32,
    pub disposition: u32,
    pub full_response: CertTransBlob,
    pub encoded_cert: CertTransBlob,
    pub disposition_message: CertTransBlob,
    pub status: StatusCode,
}

impl Message for Request2Response {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.that)?;
        w.write_u32(self.request_id);
        w.write_u32(self.disposition);
        w.write(&self.full_response)?;
        w.write(&self.encoded_cert)?;
        w.write(&self.disposition_message)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            that: r.read()?,
            request_id: r.read_u32()?,
            disposition: r.read_u32()?,
            full_response: r.read()?,
            encoded_cert: r.read()?,
            disposition_message: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for Request2Response {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCAPropertyRequest {
    pub this: OrpcThis,
    pub authority: Unique<WString>,
    /// One of [`prop`](crate::wcce::prop)
    pub prop_id: i32,
    pub prop_index: i32,
    /// One of [`proptype`](crate::wcce::proptype)
    pub prop_type: i32,
}

impl GetCAPropertyRequest {
    pub fn new(authority: &str, prop_id: i32, prop_index: i32, prop_type: i32) -> Self {
        Self {
            this: OrpcThis::new(),
            authority: unique_wstring(authority),
            prop_id,
            prop_index,
            prop_type,
        }
    }
}

impl Message for GetCAPropertyRequest {
    fn validate(&self) -> Result<(), Violation> {
        check_utf16_len("Authority", self.authority.as_str(), MAX_AUTHORITY_LEN)
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.this)?;
        w.write(&self.authority)?;
        w.write_i32(self.prop_id);
        w.write_i32(self.prop_index);
        w.write_i32(self.prop_type);
        Ok(())
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            this: r.read()?,
            authority: r.read()?,
            prop_id: r.read_i32()?,
            prop_index: r.read_i32()?,
            prop_type: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCAPropertyInfoResponse {
    pub that: OrpcThat,
    pub property_count: i32,
    /// Packed `CATRANSPROP` entries
    pub property_info: CertTransBlob,
    pub status: StatusCode,
}

impl Message for GetCAPropertyInfoResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.that)?;
        w.write_i32(self.property_count);
        w.write(&self.property_info)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            that: r.read()?,
            property_count: r.read_i32()?,
            property_info: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for GetCAPropertyInfoResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

dcerpc::operation!(Request2, opnum::REQUEST2, Request2Request, Request2Response);
dcerpc::operation!(
    GetCAProperty,
    opnum::GET_CA_PROPERTY,
    GetCAPropertyRequest,
    PropertyResponse<CertTransBlob>
);
dcerpc::operation!(
    GetCAPropertyInfo,
    opnum::GET_CA_PROPERTY_INFO,
    AuthorityRequest,
    GetCAPropertyInfoResponse
);
dcerpc::operation!(Ping2, opnum::PING2, AuthorityRequest, OrpcResponse);
