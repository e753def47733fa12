//! IRPCRemoteObject wire protocol

use crate::pan::RemoteObjectHandle;
use dcerpc::{Message, ReturnCode, StatusCode, SyntaxId};
use midl_ndr::{NdrReader, NdrWriter};

/// IRPCRemoteObject syntax (ae33069b-a2a8-46ee-a235-ddfd339be281 v1.0)
pub const REMOTE_OBJECT_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0xae33069b_a2a8_46ee_a235_ddfd339be281, 1, 0);

/// Operation numbers for IRPCRemoteObject
pub mod opnum {
    pub const CREATE: u16 = 0;
    pub const DELETE: u16 = 1;
}

/// Create takes nothing but the binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRequest;

impl Message for CreateRequest {
    fn encode_ndr(&self, _w: &mut NdrWriter) -> midl_ndr::Result<()> {
        Ok(())
    }

    fn decode_ndr(_r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateResponse {
    pub remote_object: RemoteObjectHandle,
    pub status: StatusCode,
}

impl Message for CreateResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.remote_object)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            remote_object: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for CreateResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteRequest {
    pub remote_object: RemoteObjectHandle,
}

impl Message for DeleteRequest {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.remote_object)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            remote_object: r.read()?,
        })
    }
}

/// Delete has no return value; the handle comes back nil
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteResponse {
    pub remote_object: RemoteObjectHandle,
}

impl Message for DeleteResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.remote_object)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            remote_object: r.read()?,
        })
    }
}

impl ReturnCode for DeleteResponse {
    fn return_code(&self) -> StatusCode {
        StatusCode::S_OK
    }
}

dcerpc::operation!(Create, opnum::CREATE, CreateRequest, CreateResponse);
dcerpc::operation!(Delete, opnum::DELETE, DeleteRequest, DeleteResponse);
