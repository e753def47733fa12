//! IRPCAsyncNotify wire protocol (MS-PAN 3.1.1)

use crate::pan::{
    check_payload, payload, payload_bytes, size_of, ConversationStyle, Notification,
    NotifyObjectHandle, Payload, RemoteObjectHandle, UserFilter,
};
use dcerpc::{check_utf16_len, Message, ReturnCode, StatusCode, SyntaxId, Violation};
use midl_ndr::{unique_wstring, ConformantArray, NdrError, NdrReader, NdrWriter, Unique, Uuid, WString};

/// IRPCAsyncNotify syntax (0b6edbfa-4a24-4fc6-8a23-942b1eca65d1 v1.0)
pub const ASYNC_NOTIFY_SYNTAX: SyntaxId =
    SyntaxId::from_u128(0x0b6edbfa_4a24_4fc6_8a23_942b1eca65d1, 1, 0);

/// Longest registration name accepted, in UTF-16 units
pub const MAX_NAME_LEN: usize = 260;

/// Operation numbers for IRPCAsyncNotify
pub mod opnum {
    pub const REGISTER_CLIENT: u16 = 0;
    pub const UNREGISTER_CLIENT: u16 = 1;
    /// Reserved; never sent on the wire
    pub const RESERVED: u16 = 2;
    pub const GET_NEW_CHANNEL: u16 = 3;
    pub const GET_NOTIFICATION_SEND_RESPONSE: u16 = 4;
    pub const GET_NOTIFICATION: u16 = 5;
    pub const CLOSE_CHANNEL: u16 = 6;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterClientRequest {
    pub registration_object: RemoteObjectHandle,
    /// Name of the print server or printer; an empty name is sent as null
    pub name: Unique<WString>,
    pub notification_type: Uuid,
    pub filter: UserFilter,
    pub style: ConversationStyle,
}

impl RegisterClientRequest {
    pub fn new(
        registration_object: RemoteObjectHandle,
        name: &str,
        notification_type: Uuid,
        filter: UserFilter,
        style: ConversationStyle,
    ) -> Self {
        Self {
            registration_object,
            name: unique_wstring(name),
            notification_type,
            filter,
            style,
        }
    }
}

impl Message for RegisterClientRequest {
    fn validate(&self) -> Result<(), Violation> {
        check_utf16_len("Name", self.name.as_str(), MAX_NAME_LEN)
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.registration_object)?;
        w.write(&self.name)?;
        w.write(&self.notification_type)?;
        w.write(&self.filter)?;
        w.write(&self.style)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            registration_object: r.read()?,
            name: r.read()?,
            notification_type: r.read()?,
            filter: r.read()?,
            style: r.read()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterClientResponse {
    /// Server the client should register with instead, if any
    pub referral: Unique<WString>,
    pub status: StatusCode,
}

impl RegisterClientResponse {
    pub fn status(status: StatusCode) -> Self {
        Self {
            referral: Unique::null(),
            status,
        }
    }
}

impl Message for RegisterClientResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.referral)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            referral: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for RegisterClientResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

/// Request carrying only a remote object handle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteObjectRequest {
    pub remote_object: RemoteObjectHandle,
}

impl RemoteObjectRequest {
    pub fn new(remote_object: RemoteObjectHandle) -> Self {
        Self { remote_object }
    }
}

impl Message for RemoteObjectRequest {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.remote_object)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            remote_object: r.read()?,
        })
    }
}

/// Response carrying only the return value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusResponse {
    pub status: StatusCode,
}

impl Message for StatusResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self { status: r.read()? })
    }
}

impl ReturnCode for StatusResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetNewChannelResponse {
    pub channel_count: u32,
    pub channels: Unique<ConformantArray<NotifyObjectHandle>>,
    pub status: StatusCode,
}

impl GetNewChannelResponse {
    pub fn channels(channels: Vec<NotifyObjectHandle>) -> Self {
        Self {
            channel_count: channels.len() as u32,
            channels: Unique::new(ConformantArray::new(channels)),
            status: StatusCode::S_OK,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn into_channels(self) -> Vec<NotifyObjectHandle> {
        self.channels.into_option().map(ConformantArray::into_inner).unwrap_or_default()
    }
}

impl Message for GetNewChannelResponse {
    fn prepare(&mut self) {
        if self.channel_count == 0 {
            self.channel_count = self.channels.as_ref().map_or(0, |array| array.len() as u32);
        }
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write_u32(self.channel_count);
        w.write(&self.channels)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        let channel_count = r.read_u32()?;
        let channels: Unique<ConformantArray<NotifyObjectHandle>> = r.read()?;
        if let Some(array) = channels.as_ref() {
            if array.len() != channel_count as usize {
                return Err(NdrError::LengthMismatch {
                    field: "NumberOfChannels",
                    declared: channel_count as usize,
                    actual: array.len(),
                });
            }
        }
        Ok(Self {
            channel_count,
            channels,
            status: r.read()?,
        })
    }
}

impl ReturnCode for GetNewChannelResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetNotificationSendResponseRequest {
    pub channel: NotifyObjectHandle,
    /// Type of the response; null on the first call of a channel
    pub notification_type: Unique<Uuid>,
    pub size: u32,
    pub data: Payload,
}

impl GetNotificationSendResponseRequest {
    /// Send `response` (if any) and ask for the next notification
    pub fn new(channel: NotifyObjectHandle, response: Option<&Notification>) -> Self {
        match response {
            Some(response) => Self {
                channel,
                notification_type: Unique::new(response.notification_type),
                size: response.data.len() as u32,
                data: payload(&response.data),
            },
            None => Self {
                channel,
                ..Default::default()
            },
        }
    }

    /// The response carried by this call, if any
    pub fn response(&self) -> Option<Notification> {
        self.notification_type
            .as_ref()
            .map(|notification_type| Notification::new(*notification_type, payload_bytes(&self.data)))
    }
}

impl Message for GetNotificationSendResponseRequest {
    fn validate(&self) -> Result<(), Violation> {
        if self.size != size_of(&self.data) {
            return Err(Violation::new("InSize", "does not match the notification data"));
        }
        Ok(())
    }

    fn prepare(&mut self) {
        if self.size == 0 {
            self.size = size_of(&self.data);
        }
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.channel)?;
        w.write(&self.notification_type)?;
        w.write_u32(self.size);
        w.write(&self.data)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        let channel = r.read()?;
        let notification_type = r.read()?;
        let size = r.read_u32()?;
        let data = r.read()?;
        check_payload("InSize", size, &data)?;
        Ok(Self {
            channel,
            notification_type,
            size,
            data,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetNotificationSendResponseResponse {
    /// The channel, or a nil handle once the channel is closed
    pub channel: NotifyObjectHandle,
    pub notification_type: Unique<Uuid>,
    pub size: u32,
    pub data: Payload,
    pub status: StatusCode,
}

impl GetNotificationSendResponseResponse {
    pub fn notification(channel: NotifyObjectHandle, notification: &Notification) -> Self {
        Self {
            channel,
            notification_type: Unique::new(notification.notification_type),
            size: notification.data.len() as u32,
            data: payload(&notification.data),
            status: StatusCode::S_OK,
        }
    }

    pub fn status(channel: NotifyObjectHandle, status: StatusCode) -> Self {
        Self {
            channel,
            status,
            ..Default::default()
        }
    }

    pub fn notification_data(&self) -> Option<Notification> {
        self.notification_type
            .as_ref()
            .map(|notification_type| Notification::new(*notification_type, payload_bytes(&self.data)))
    }
}

impl Message for GetNotificationSendResponseResponse {
    fn prepare(&mut self) {
        if self.size == 0 {
            self.size = size_of(&self.data);
        }
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.channel)?;
        w.write(&self.notification_type)?;
        w.write_u32(self.size);
        w.write(&self.data)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        let channel = r.read()?;
        let notification_type = r.read()?;
        let size = r.read_u32()?;
        let data = r.read()?;
        check_payload("OutSize", size, &data)?;
        Ok(Self {
            channel,
            notification_type,
            size,
            data,
            status: r.read()?,
        })
    }
}

impl ReturnCode for GetNotificationSendResponseResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetNotificationResponse {
    pub notification_type: Unique<Uuid>,
    pub size: u32,
    pub data: Payload,
    pub status: StatusCode,
}

impl GetNotificationResponse {
    pub fn notification(notification: &Notification) -> Self {
        Self {
            notification_type: Unique::new(notification.notification_type),
            size: notification.data.len() as u32,
            data: payload(&notification.data),
            status: StatusCode::S_OK,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn notification_data(&self) -> Option<Notification> {
        self.notification_type
            .as_ref()
            .map(|notification_type| Notification::new(*notification_type, payload_bytes(&self.data)))
    }
}

impl Message for GetNotificationResponse {
    fn prepare(&mut self) {
        if self.size == 0 {
            self.size = size_of(&self.data);
        }
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.notification_type)?;
        w.write_u32(self.size);
        w.write(&self.data)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        let notification_type = r.read()?;
        let size = r.read_u32()?;
        let data = r.read()?;
        check_payload("OutSize", size, &data)?;
        Ok(Self {
            notification_type,
            size,
            data,
            status: r.read()?,
        })
    }
}

impl ReturnCode for GetNotificationResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloseChannelRequest {
    pub channel: NotifyObjectHandle,
    pub notification_type: Uuid,
    pub size: u32,
    /// Final response sent with the close
    pub reason: Payload,
}

impl CloseChannelRequest {
    pub fn new(channel: NotifyObjectHandle, notification_type: Uuid, reason: &[u8]) -> Self {
        Self {
            channel,
            notification_type,
            size: reason.len() as u32,
            reason: payload(reason),
        }
    }
}

impl Message for CloseChannelRequest {
    fn validate(&self) -> Result<(), Violation> {
        if self.size != size_of(&self.reason) {
            return Err(Violation::new("InSize", "does not match the reason data"));
        }
        Ok(())
    }

    fn prepare(&mut self) {
        if self.size == 0 {
            self.size = size_of(&self.reason);
        }
    }

    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.channel)?;
        w.write(&self.notification_type)?;
        w.write_u32(self.size);
        w.write(&self.reason)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        let channel = r.read()?;
        let notification_type = r.read()?;
        let size = r.read_u32()?;
        let reason = r.read()?;
        check_payload("InSize", size, &reason)?;
        Ok(Self {
            channel,
            notification_type,
            size,
            reason,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloseChannelResponse {
    pub channel: NotifyObjectHandle,
    pub status: StatusCode,
}

impl Message for CloseChannelResponse {
    fn encode_ndr(&self, w: &mut NdrWriter) -> midl_ndr::Result<()> {
        w.write(&self.channel)?;
        w.write(&self.status)
    }

    fn decode_ndr(r: &mut NdrReader<'_>) -> midl_ndr::Result<Self> {
        Ok(Self {
            channel: r.read()?,
            status: r.read()?,
        })
    }
}

impl ReturnCode for CloseChannelResponse {
    fn return_code(&self) -> StatusCode {
        self.status
    }
}

dcerpc::operation!(RegisterClient, opnum::REGISTER_CLIENT, RegisterClientRequest, RegisterClientResponse);
dcerpc::operation!(UnregisterClient, opnum::UNREGISTER_CLIENT, RemoteObjectRequest, StatusResponse);
dcerpc::operation!(GetNewChannel, opnum::GET_NEW_CHANNEL, RemoteObjectRequest, GetNewChannelResponse);
dcerpc::operation!(
    GetNotificationSendResponse,
    opnum::GET_NOTIFICATION_SEND_RESPONSE,
    GetNotificationSendResponseRequest,
    GetNotificationSendResponseResponse
);
dcerpc::operation!(GetNotification, opnum::GET_NOTIFICATION, RemoteObjectRequest, GetNotificationResponse);
dcerpc::operation!(CloseChannel, opnum::CLOSE_CHANNEL, CloseChannelRequest, CloseChannelResponse);
