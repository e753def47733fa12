//! Generic ORPC envelopes
//!
//! Many DCOM operations take nothing but the `ORPCTHIS` header, or the header
//! and a single value, and answer with `ORPCTHAT`, at most one value and the
//! HRESULT. Property getters and setters are the common case.

use crate::types::{OrpcThat, OrpcThis};
use dcerpc::{Message, ReturnCode, StatusCode};
use midl_ndr::{NdrDecode, NdrEncode, NdrReader, NdrWriter};

/// Request carrying only `ORPCTHIS`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrpcRequest {
    pub this: OrpcThis,
}

impl Message for OrpcRequest {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.this)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self { this: r.read()? })
    }
}

/// Response carrying `ORPCTHAT` and the HRESULT
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrpcResponse {
    pub that: OrpcThat,
    pub status: StatusCode,
}

impl Message for OrpcResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.that)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            that: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for OrpcResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

/// Request carrying `ORPCTHIS` and one `[in]` value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRequest<T> {
    pub this: OrpcThis,
    pub value: T,
}

impl<T> PropertyRequest<T> {
    pub fn new(value: T) -> Self {
        Self {
            this: OrpcThis::new(),
            value,
        }
    }
}

impl<T> Message for PropertyRequest<T>
where
    T: NdrEncode + NdrDecode + Send + 'static,
{
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.this)?;
        w.write(&self.value)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            this: r.read()?,
            value: r.read()?,
        })
    }
}

/// Response carrying `ORPCTHAT`, one `[out]` value and the HRESULT
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyResponse<T> {
    pub that: OrpcThat,
    pub value: T,
    pub status: StatusCode,
}

impl<T> PropertyResponse<T> {
    /// Successful response carrying `value`
    pub fn ok(value: T) -> Self {
        Self {
            that: OrpcThat::new(),
            value,
            status: StatusCode::S_OK,
        }
    }
}

impl<T> Message for PropertyResponse<T>
where
    T: NdrEncode + NdrDecode + Send + 'static,
{
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.that)?;
        w.write(&self.value)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            that: r.read()?,
            value: r.read()?,
            status: r.read()?,
        })
    }
}

impl<T> ReturnCode for PropertyResponse<T> {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}
