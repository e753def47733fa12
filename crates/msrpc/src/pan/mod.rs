//! Print System Asynchronous Notification protocol (MS-PAN)
//!
//! A client creates a remote object with IRPCRemoteObject, registers it for
//! one notification type with IRPCAsyncNotify, then either polls
//! notifications one at a time (unidirectional) or receives channels and
//! exchanges notifications and responses on them (bidirectional).
//!
//! ```text
//! Create ──► Idle ──RegisterClient──► Registered ──UnregisterClient──► Unregistered
//!                                        │
//!              unidirectional: GetNotification (blocks, one per call)
//!              bidirectional:  GetNewChannel ──► Open ──CloseChannel──► Closed
//!                                                 └─ GetNotificationSendResponse
//! ```
//!
//! [`NotificationServer`] implements both interfaces with these rules and
//! exposes a publisher API for the local print subsystem.

pub mod async_notify;
pub mod remote_object;

mod notification_server;

pub use notification_server::{ChannelResponse, NotificationServer, NotificationServerConfig};

use dcerpc::StatusCode;
use midl_ndr::{ConformantArray, NdrError, Unique, Uuid};

midl_ndr::context_handle! {
    /// Handle to a remote object (`PRPCREMOTEOBJECT`)
    pub struct RemoteObjectHandle;
}

midl_ndr::context_handle! {
    /// Handle to a bidirectional notification channel (`PNOTIFYOBJECT`)
    pub struct NotifyObjectHandle;
}

midl_ndr::ndr_enum! {
    /// Which users' notifications a registration receives (`PrintAsyncNotifyUserFilter`)
    pub enum UserFilter: u32 {
        PerUser = 0,
        AllUsers = 1,
    }
}

midl_ndr::ndr_enum! {
    /// Conversation style of a registration (`PrintAsyncNotifyConversationStyle`)
    pub enum ConversationStyle: u32 {
        Bidirectional = 0,
        Unidirectional = 1,
    }
}

/// Return codes of the notification protocol
pub mod status {
    use dcerpc::StatusCode;

    pub const E_ACCESSDENIED: StatusCode = StatusCode::E_ACCESSDENIED;
    pub const E_OUTOFMEMORY: StatusCode = StatusCode::E_OUTOFMEMORY;
    /// The channel has already been closed
    pub const E_NOTIFICATION_CHANNEL_CLOSED: StatusCode = StatusCode::new(0x8004_0008);
    /// A call is already outstanding on the handle
    pub const E_CALL_OUTSTANDING: StatusCode = StatusCode::new(0x8004_000C);
    /// The response is larger than the server accepts
    pub const E_RESPONSE_TOO_LARGE: StatusCode = StatusCode::new(0x8004_0012);
    /// The notification type differs from the registration's
    pub const E_NOTIFICATION_TYPE_MISMATCH: StatusCode = StatusCode::new(0x8004_0014);
    /// No more registrations are accepted
    pub const E_REGISTRATION_LIMIT: StatusCode = StatusCode::new(0x8007_0015);
    /// The registration name is empty or too long
    pub const E_INVALID_NAME: StatusCode = StatusCode::new(0x8007_007B);
    /// The registration or channel was terminated while the call waited
    pub const E_NOTIFICATIONS_TERMINATED: StatusCode = StatusCode::new(0x8007_071A);
}

/// One notification: its type and opaque payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub notification_type: Uuid,
    pub data: Vec<u8>,
}

impl Notification {
    pub fn new(notification_type: Uuid, data: impl Into<Vec<u8>>) -> Self {
        Self {
            notification_type,
            data: data.into(),
        }
    }
}

/// A sized byte payload on the wire; empty data travels as a null pointer
pub(crate) type Payload = Unique<ConformantArray<u8>>;

pub(crate) fn payload(data: &[u8]) -> Payload {
    if data.is_empty() {
        Unique::null()
    } else {
        Unique::new(ConformantArray::from(data))
    }
}

pub(crate) fn payload_bytes(payload: &Payload) -> &[u8] {
    payload.as_ref().map_or(&[][..], |array| array.0.as_slice())
}

/// A size parameter must describe its payload exactly
pub(crate) fn check_payload(field: &'static str, size: u32, payload: &Payload) -> midl_ndr::Result<()> {
    let actual = payload_bytes(payload).len();
    if size as usize != actual {
        return Err(NdrError::LengthMismatch {
            field,
            declared: size as usize,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn size_of(data: &Payload) -> u32 {
    payload_bytes(data).len() as u32
}

/// Whether a response status ends the exchange it belongs to
pub fn is_terminal(status: StatusCode) -> bool {
    status == status::E_NOTIFICATIONS_TERMINATED || status == status::E_NOTIFICATION_CHANNEL_CLOSED
}
