//! Operation envelopes
//!
//! Every remote procedure is an [`Operation`]: a fixed opnum, a name for
//! diagnostics, and a request/response pair of [`Message`]s. A message knows
//! how to validate itself, fill in derived fields, and move its parameters
//! through the NDR codec in declaration order.
//!
//! ```
//! use dcerpc::{operation, Message, ReturnCode, StatusCode};
//! use midl_ndr::{NdrReader, NdrWriter};
//!
//! #[derive(Debug, Default)]
//! pub struct PingRequest;
//!
//! impl Message for PingRequest {
//!     fn encode_ndr(&self, _w: &mut NdrWriter) -> midl_ndr::Result<()> {
//!         Ok(())
//!     }
//!     fn decode_ndr(_r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
//!         Ok(Self)
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! pub struct PingResponse {
//!     pub status: StatusCode,
//! }
//!
//! impl Message for PingResponse {
//!     fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
//!         w.write(&self.status)
//!     }
//!     fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
//!         Ok(Self { status: r.read()? })
//!     }
//! }
//!
//! impl ReturnCode for PingResponse {
//!     fn return_code(&self) -> StatusCode {
//!         self.status
//!     }
//! }
//!
//! operation!(Ping, 0, PingRequest, PingResponse);
//! ```

use crate::error::{Result, RpcError, Violation};
use crate::status::StatusCode;
use bytes::Bytes;
use midl_ndr::{utf16_len, NdrContext, NdrReader, NdrWriter};
use tracing::trace;

/// Request or response parameters of one operation
pub trait Message: Sized + Send + 'static {
    /// Check declared constraints before anything is written
    fn validate(&self) -> std::result::Result<(), Violation> {
        Ok(())
    }

    /// Fill derived fields (such as sizes computed from data) before encoding
    fn prepare(&mut self) {}

    /// Write the parameters in declaration order
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()>;

    /// Read the parameters in declaration order
    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self>;
}

/// Responses that end in a status value
pub trait ReturnCode {
    fn return_code(&self) -> StatusCode;
}

/// A remote procedure of an interface
pub trait Operation: Send + Sync + 'static {
    /// Operation number within the flattened interface table
    const OPNUM: u16;
    /// Name used in errors and logs
    const NAME: &'static str;

    type Request: Message;
    type Response: Message + ReturnCode;
}

/// Declare a zero-sized [`Operation`] type
#[macro_export]
macro_rules! operation {
    ($(#[$meta:meta])* $name:ident, $opnum:expr, $request:ty, $response:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $crate::Operation for $name {
            const OPNUM: u16 = $opnum;
            const NAME: &'static str = stringify!($name);
            type Request = $request;
            type Response = $response;
        }
    };
}

/// Prepare, validate and encode a message into stub data
///
/// Validation happens before the first byte is written, so a rejected
/// request produces no output.
pub fn encode_message<M: Message>(op: &'static str, mut message: M, ctx: NdrContext) -> Result<Bytes> {
    message.prepare();
    message
        .validate()
        .map_err(|violation| RpcError::Validation { op, violation })?;

    let mut w = NdrWriter::with_context(ctx);
    message.encode_ndr(&mut w)?;
    trace!("{}: encoded {} bytes of stub data", op, w.position());
    Ok(w.into_bytes())
}

/// Decode stub data into a message
pub fn decode_message<M: Message>(stub: &[u8], ctx: NdrContext) -> Result<M> {
    let mut r = NdrReader::with_context(stub, ctx);
    Ok(M::decode_ndr(&mut r)?)
}

/// Check a string against a ceiling counted in UTF-16 code units
pub fn check_utf16_len(field: &'static str, value: &str, max: usize) -> std::result::Result<(), Violation> {
    let len = utf16_len(value);
    if len > max {
        return Err(Violation::too_long(field, len, max));
    }
    Ok(())
}
