//! Stateful notification server
//!
//! Owns every remote object, registration and channel minted for clients
//! and enforces their lifecycle:
//!
//! - handles are bound to the association that created them
//! - a handle or channel is never usable again once unregistered, deleted
//!   or closed
//! - at most one blocking call is outstanding per handle or channel
//! - blocking calls are released by unregister, close, delete, forced
//!   channel release and shutdown
//! - undelivered notifications and unclaimed channels are held in bounded
//!   queues; on overflow the oldest entry is dropped
//! - a closed channel leaves the table once no call is waiting on it; only a
//!   bounded record of recently closed handles is kept
//!
//! The publisher side (`notify`, `send`, `close_channels`, `shutdown`) is
//! what the local print subsystem calls; client responses on channels are
//! delivered through [`NotificationServer::take_responses`].

use super::async_notify::*;
use super::remote_object::*;
use super::status::*;
use super::{
    payload_bytes, ConversationStyle, Notification, NotifyObjectHandle, RemoteObjectHandle,
    UserFilter,
};
use async_trait::async_trait;
use dcerpc::{CallContext, DceRpcServer, Result, RpcError, StatusCode};
use midl_ndr::{utf16_len, Uuid};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info, trace, warn};

/// Limits of a [`NotificationServer`]
#[derive(Debug, Clone)]
pub struct NotificationServerConfig {
    /// Undelivered notifications kept per registration or channel
    pub max_queued_notifications: usize,
    /// Registrations accepted across all clients
    pub max_registrations: usize,
    /// Largest response payload accepted from a client
    pub max_notification_size: usize,
    /// Channels handed out by one GetNewChannel call
    pub max_channels: usize,
    /// Closed channel handles remembered so late calls get the closed status
    pub max_closed_channels: usize,
}

impl Default for NotificationServerConfig {
    fn default() -> Self {
        Self {
            max_queued_notifications: 64,
            max_registrations: 1024,
            max_notification_size: 64 * 1024,
            max_channels: 16,
            max_closed_channels: 256,
        }
    }
}

/// A response a client sent on a bidirectional channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResponse {
    pub channel: NotifyObjectHandle,
    pub notification: Notification,
    /// Sent with CloseChannel; no more responses follow on this channel
    pub closing: bool,
}

struct Registration {
    name: String,
    notification_type: Uuid,
    filter: UserFilter,
    style: ConversationStyle,
    queue: VecDeque<Notification>,
    /// Channels opened for this registration but not yet handed out
    pending: VecDeque<NotifyObjectHandle>,
}

enum Phase {
    Idle,
    Registered(Registration),
    Unregistered,
}

struct RemoteObject {
    association: u32,
    phase: Phase,
    outstanding: bool,
    wake: Arc<Notify>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelPhase {
    Pending,
    Open,
    Closed,
}

struct Channel {
    remote_object: RemoteObjectHandle,
    association: u32,
    notification_type: Uuid,
    phase: ChannelPhase,
    queue: VecDeque<Vec<u8>>,
    outstanding: bool,
    wake: Arc<Notify>,
}

impl Channel {
    fn close(&mut self) {
        self.phase = ChannelPhase::Closed;
        self.queue.clear();
        self.wake.notify_waiters();
    }
}

/// What is left of a channel after it leaves the table
struct ClosedChannel {
    remote_object: RemoteObjectHandle,
    association: u32,
}

struct State {
    objects: HashMap<RemoteObjectHandle, RemoteObject>,
    channels: HashMap<NotifyObjectHandle, Channel>,
    closed: HashMap<NotifyObjectHandle, ClosedChannel>,
    closed_order: VecDeque<NotifyObjectHandle>,
    max_closed: usize,
    registrations: usize,
    shutdown: bool,
}

impl State {
    /// The caller's own remote object
    fn object(
        &mut self,
        handle: &RemoteObjectHandle,
        association: u32,
    ) -> std::result::Result<&mut RemoteObject, StatusCode> {
        match self.objects.get_mut(handle) {
            Some(object) if object.association == association => Ok(object),
            Some(_) => {
                warn!("Remote object {:?} used from association {}", handle, association);
                Err(E_ACCESSDENIED)
            }
            None => Err(E_ACCESSDENIED),
        }
    }

    /// The caller's own channel
    fn channel(
        &mut self,
        handle: &NotifyObjectHandle,
        association: u32,
    ) -> std::result::Result<&mut Channel, StatusCode> {
        match self.channels.get_mut(handle) {
            Some(channel) if channel.association == association => Ok(channel),
            Some(_) => {
                warn!("Channel {:?} used from association {}", handle, association);
                Err(E_ACCESSDENIED)
            }
            None => match self.closed.get(handle) {
                Some(closed) if closed.association == association => Err(E_NOTIFICATION_CHANNEL_CLOSED),
                _ => Err(E_ACCESSDENIED),
            },
        }
    }

    /// Close a channel and drop it from the table, or leave that to its
    /// outstanding call
    fn close_channel(&mut self, handle: &NotifyObjectHandle) {
        let Some(channel) = self.channels.get_mut(handle) else {
            return;
        };
        if channel.phase != ChannelPhase::Closed {
            channel.close();
        }
        if !channel.outstanding {
            self.retire_channel(handle);
        }
    }

    /// Move a closed channel out of the table, remembering its handle
    fn retire_channel(&mut self, handle: &NotifyObjectHandle) {
        let Some(channel) = self.channels.remove(handle) else {
            return;
        };
        if self.max_closed == 0 {
            return;
        }
        if self.closed_order.len() >= self.max_closed {
            if let Some(oldest) = self.closed_order.pop_front() {
                self.closed.remove(&oldest);
            }
        }
        self.closed.insert(
            *handle,
            ClosedChannel {
                remote_object: channel.remote_object,
                association: channel.association,
            },
        );
        self.closed_order.push_back(*handle);
    }

    fn close_channels_of(&mut self, remote_object: &RemoteObjectHandle) {
        let handles: Vec<NotifyObjectHandle> = self
            .channels
            .iter()
            .filter(|(_, channel)| channel.remote_object == *remote_object)
            .map(|(handle, _)| *handle)
            .collect();
        for handle in &handles {
            self.close_channel(handle);
        }
    }

    /// Forget every channel of a deleted remote object
    fn forget_channels_of(&mut self, remote_object: &RemoteObjectHandle) {
        self.channels.retain(|_, channel| {
            if channel.remote_object == *remote_object {
                channel.wake.notify_waiters();
                false
            } else {
                true
            }
        });
        self.closed.retain(|_, closed| closed.remote_object != *remote_object);
        let closed = &self.closed;
        self.closed_order.retain(|handle| closed.contains_key(handle));
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Object(RemoteObjectHandle),
    Channel(NotifyObjectHandle),
}

/// Marks a blocking call as outstanding until dropped
struct Outstanding<'a> {
    state: &'a Mutex<State>,
    slot: Slot,
}

impl Drop for Outstanding<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        match self.slot {
            Slot::Object(handle) => {
                if let Some(object) = state.objects.get_mut(&handle) {
                    object.outstanding = false;
                }
            }
            Slot::Channel(handle) => {
                if let Some(channel) = state.channels.get_mut(&handle) {
                    channel.outstanding = false;
                    if channel.phase == ChannelPhase::Closed {
                        state.retire_channel(&handle);
                    }
                }
            }
        }
    }
}

/// IRPCRemoteObject and IRPCAsyncNotify server with the notification lifecycle
pub struct NotificationServer {
    config: NotificationServerConfig,
    state: Mutex<State>,
    responses: mpsc::Sender<ChannelResponse>,
    responses_rx: Mutex<Option<mpsc::Receiver<ChannelResponse>>>,
}

impl NotificationServer {
    pub fn new() -> Self {
        Self::with_config(NotificationServerConfig::default())
    }

    pub fn with_config(config: NotificationServerConfig) -> Self {
        let (responses, responses_rx) = mpsc::channel(config.max_queued_notifications.max(1));
        let max_closed = config.max_closed_channels;
        Self {
            config,
            state: Mutex::new(State {
                objects: HashMap::new(),
                channels: HashMap::new(),
                closed: HashMap::new(),
                closed_order: VecDeque::new(),
                max_closed,
                registrations: 0,
                shutdown: false,
            }),
            responses,
            responses_rx: Mutex::new(Some(responses_rx)),
        }
    }

    pub fn config(&self) -> &NotificationServerConfig {
        &self.config
    }

    /// Register IRPCRemoteObject and IRPCAsyncNotify with a DCE RPC server
    pub async fn register(self: &Arc<Self>, server: &DceRpcServer) {
        RemoteObjectServer::new(Arc::clone(self) as Arc<dyn RemoteObjectHandler>)
            .register(server)
            .await;
        AsyncNotifyServer::new(Arc::clone(self) as Arc<dyn AsyncNotifyHandler>)
            .register(server)
            .await;
    }

    /// Receiver of client responses on bidirectional channels; taken once
    pub fn take_responses(&self) -> Option<mpsc::Receiver<ChannelResponse>> {
        self.responses_rx.lock().take()
    }

    /// Number of active registrations
    pub fn registrations(&self) -> usize {
        self.state.lock().registrations
    }

    /// Publish a notification to every matching registration
    ///
    /// Unidirectional registrations queue it for GetNotification;
    /// bidirectional registrations get a new channel carrying it. A
    /// registration with the all-users filter matches any notification, a
    /// per-user registration only per-user notifications. Returns the number
    /// of registrations reached.
    pub fn notify(&self, notification_type: Uuid, filter: UserFilter, data: impl Into<Vec<u8>>) -> usize {
        let data = data.into();
        let max_queued = self.config.max_queued_notifications;
        let mut state = self.state.lock();
        if state.shutdown {
            return 0;
        }

        let State {
            objects, channels, ..
        } = &mut *state;
        let mut reached = 0;
        for (handle, object) in objects.iter_mut() {
            let Phase::Registered(registration) = &mut object.phase else {
                continue;
            };
            if registration.notification_type != notification_type
                || (registration.filter == UserFilter::PerUser && filter != UserFilter::PerUser)
            {
                continue;
            }

            match registration.style {
                ConversationStyle::Unidirectional => {
                    if registration.queue.len() >= max_queued {
                        registration.queue.pop_front();
                        warn!(
                            "Notification queue of {} is full, dropping the oldest notification",
                            registration.name
                        );
                    }
                    registration
                        .queue
                        .push_back(Notification::new(notification_type, data.clone()));
                }
                ConversationStyle::Bidirectional => {
                    if registration.pending.len() >= max_queued {
                        if let Some(oldest) = registration.pending.pop_front() {
                            channels.remove(&oldest);
                        }
                        warn!(
                            "Pending channels of {} are full, dropping the oldest channel",
                            registration.name
                        );
                    }
                    let channel = NotifyObjectHandle::generate();
                    channels.insert(
                        channel,
                        Channel {
                            remote_object: *handle,
                            association: object.association,
                            notification_type,
                            phase: ChannelPhase::Pending,
                            queue: VecDeque::from([data.clone()]),
                            outstanding: false,
                            wake: Arc::new(Notify::new()),
                        },
                    );
                    registration.pending.push_back(channel);
                    debug!("Opened channel {:?} for {}", channel, registration.name);
                }
            }
            object.wake.notify_waiters();
            reached += 1;
        }
        trace!("Notification {} reached {} registrations", notification_type, reached);
        reached
    }

    /// Queue the next notification on an open channel
    pub fn send(&self, channel: NotifyObjectHandle, data: impl Into<Vec<u8>>) -> std::result::Result<(), StatusCode> {
        let max_queued = self.config.max_queued_notifications;
        let mut state = self.state.lock();
        if !state.channels.contains_key(&channel) {
            return Err(if state.closed.contains_key(&channel) {
                E_NOTIFICATION_CHANNEL_CLOSED
            } else {
                E_ACCESSDENIED
            });
        }
        let channel_state = state.channels.get_mut(&channel).ok_or(E_ACCESSDENIED)?;
        if channel_state.phase == ChannelPhase::Closed {
            return Err(E_NOTIFICATION_CHANNEL_CLOSED);
        }
        if channel_state.queue.len() >= max_queued {
            channel_state.queue.pop_front();
            warn!("Channel {:?} queue is full, dropping the oldest notification", channel);
        }
        channel_state.queue.push_back(data.into());
        channel_state.wake.notify_waiters();
        Ok(())
    }

    /// Force-release every open channel of `notification_type`
    pub fn close_channels(&self, notification_type: Uuid) -> usize {
        let mut state = self.state.lock();
        let handles: Vec<NotifyObjectHandle> = state
            .channels
            .iter()
            .filter(|(_, channel)| {
                channel.notification_type == notification_type && channel.phase != ChannelPhase::Closed
            })
            .map(|(handle, _)| *handle)
            .collect();
        for handle in &handles {
            state.close_channel(handle);
        }
        debug!("Released {} channels of {}", handles.len(), notification_type);
        handles.len()
    }

    /// Stop serving; every blocked call returns with a termination status
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.shutdown = true;
        for object in state.objects.values() {
            object.wake.notify_waiters();
        }
        let handles: Vec<NotifyObjectHandle> = state.channels.keys().copied().collect();
        for handle in &handles {
            state.close_channel(handle);
        }
        info!("Notification server shut down");
    }

    fn forward(&self, channel: NotifyObjectHandle, notification: Notification, closing: bool) {
        match self.responses.try_send(ChannelResponse {
            channel,
            notification,
            closing,
        }) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(response)) => {
                warn!("Response queue is full, dropping response on {:?}", response.channel);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                trace!("No consumer for channel responses");
            }
        }
    }

    /// Wait until `poll` yields a value, re-checking after every wake-up
    async fn wait_until<T>(
        &self,
        wake: Arc<Notify>,
        mut poll: impl FnMut(&mut State) -> Option<T> + Send,
    ) -> T {
        loop {
            let notified = wake.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let ready = {
                let mut state = self.state.lock();
                poll(&mut state)
            };
            if let Some(value) = ready {
                return value;
            }
            notified.await;
        }
    }

    /// Claim the registration of `handle` for one blocking call
    fn begin_object_wait(
        &self,
        handle: &RemoteObjectHandle,
        association: u32,
        style: ConversationStyle,
    ) -> std::result::Result<(Arc<Notify>, Outstanding<'_>), StatusCode> {
        let mut state = self.state.lock();
        if state.shutdown {
            return Err(E_NOTIFICATIONS_TERMINATED);
        }
        let object = state.object(handle, association)?;
        match &object.phase {
            Phase::Registered(registration) if registration.style == style => {}
            _ => return Err(E_ACCESSDENIED),
        }
        if object.outstanding {
            return Err(E_CALL_OUTSTANDING);
        }
        object.outstanding = true;
        Ok((
            Arc::clone(&object.wake),
            Outstanding {
                state: &self.state,
                slot: Slot::Object(*handle),
            },
        ))
    }

    async fn next_notification(
        &self,
        handle: RemoteObjectHandle,
        association: u32,
    ) -> std::result::Result<Notification, StatusCode> {
        let (wake, _outstanding) =
            self.begin_object_wait(&handle, association, ConversationStyle::Unidirectional)?;

        self.wait_until(wake, |state| {
            if state.shutdown {
                return Some(Err(E_NOTIFICATIONS_TERMINATED));
            }
            match state.objects.get_mut(&handle).map(|object| &mut object.phase) {
                Some(Phase::Registered(registration)) => registration.queue.pop_front().map(Ok),
                _ => Some(Err(E_NOTIFICATIONS_TERMINATED)),
            }
        })
        .await
    }

    async fn new_channels(
        &self,
        handle: RemoteObjectHandle,
        association: u32,
    ) -> std::result::Result<Vec<NotifyObjectHandle>, StatusCode> {
        let (wake, _outstanding) =
            self.begin_object_wait(&handle, association, ConversationStyle::Bidirectional)?;
        let max_channels = self.config.max_channels.max(1);

        self.wait_until(wake, |state| {
            if state.shutdown {
                return Some(Err(E_NOTIFICATIONS_TERMINATED));
            }
            let State {
                objects, channels, ..
            } = state;
            let registration = match objects.get_mut(&handle).map(|object| &mut object.phase) {
                Some(Phase::Registered(registration)) => registration,
                _ => return Some(Err(E_NOTIFICATIONS_TERMINATED)),
            };

            let mut handed_out = Vec::new();
            while handed_out.len() < max_channels {
                let Some(channel) = registration.pending.pop_front() else {
                    break;
                };
                if let Some(state) = channels.get_mut(&channel) {
                    if state.phase == ChannelPhase::Pending {
                        state.phase = ChannelPhase::Open;
                        handed_out.push(channel);
                    }
                }
            }
            (!handed_out.is_empty()).then_some(Ok(handed_out))
        })
        .await
    }

    async fn exchange(
        &self,
        handle: NotifyObjectHandle,
        association: u32,
        response: Option<Notification>,
    ) -> std::result::Result<Notification, StatusCode> {
        let (wake, notification_type, _outstanding) = {
            let mut state = self.state.lock();
            if state.shutdown {
                return Err(E_NOTIFICATIONS_TERMINATED);
            }
            let channel = state.channel(&handle, association)?;
            match channel.phase {
                ChannelPhase::Closed => return Err(E_NOTIFICATION_CHANNEL_CLOSED),
                ChannelPhase::Pending => return Err(E_ACCESSDENIED),
                ChannelPhase::Open => {}
            }
            if let Some(response) = &response {
                if response.notification_type != channel.notification_type {
                    return Err(E_NOTIFICATION_TYPE_MISMATCH);
                }
                if response.data.len() > self.config.max_notification_size {
                    return Err(E_RESPONSE_TOO_LARGE);
                }
            }
            if channel.outstanding {
                return Err(E_CALL_OUTSTANDING);
            }
            channel.outstanding = true;
            (
                Arc::clone(&channel.wake),
                channel.notification_type,
                Outstanding {
                    state: &self.state,
                    slot: Slot::Channel(handle),
                },
            )
        };

        if let Some(response) = response {
            self.forward(handle, response, false);
        }

        self.wait_until(wake, |state| {
            if state.shutdown {
                return Some(Err(E_NOTIFICATIONS_TERMINATED));
            }
            match state.channels.get_mut(&handle) {
                Some(channel) if channel.phase == ChannelPhase::Open => channel
                    .queue
                    .pop_front()
                    .map(|data| Ok(Notification::new(notification_type, data))),
                _ => Some(Err(E_NOTIFICATIONS_TERMINATED)),
            }
        })
        .await
    }

    fn close(
        &self,
        handle: NotifyObjectHandle,
        association: u32,
        reason: Notification,
    ) -> std::result::Result<(), StatusCode> {
        {
            let mut state = self.state.lock();
            let channel = state.channel(&handle, association)?;
            if channel.phase == ChannelPhase::Closed {
                return Err(E_NOTIFICATION_CHANNEL_CLOSED);
            }
            if reason.notification_type != channel.notification_type {
                return Err(E_NOTIFICATION_TYPE_MISMATCH);
            }
            if reason.data.len() > self.config.max_notification_size {
                return Err(E_RESPONSE_TOO_LARGE);
            }
            state.close_channel(&handle);
        }
        debug!("Channel {:?} closed by client", handle);
        self.forward(handle, reason, true);
        Ok(())
    }

    fn register_client_locked(
        &self,
        ctx: &CallContext,
        request: &RegisterClientRequest,
    ) -> std::result::Result<(), StatusCode> {
        let mut state = self.state.lock();
        if state.shutdown {
            return Err(E_ACCESSDENIED);
        }
        let limit_reached = state.registrations >= self.config.max_registrations;
        let object = state.object(&request.registration_object, ctx.association)?;
        match object.phase {
            Phase::Idle => {}
            Phase::Registered(_) => return Err(E_CALL_OUTSTANDING),
            Phase::Unregistered => return Err(E_ACCESSDENIED),
        }

        let name = request.name.as_str();
        if name.is_empty() || utf16_len(name) > MAX_NAME_LEN {
            return Err(E_INVALID_NAME);
        }
        if limit_reached {
            warn!("Registration limit of {} reached", self.config.max_registrations);
            return Err(E_REGISTRATION_LIMIT);
        }

        object.phase = Phase::Registered(Registration {
            name: name.to_string(),
            notification_type: request.notification_type,
            filter: request.filter,
            style: request.style,
            queue: VecDeque::new(),
            pending: VecDeque::new(),
        });
        state.registrations += 1;
        info!(
            "Registered {} for {} ({:?}, {:?})",
            name, request.notification_type, request.style, request.filter
        );
        Ok(())
    }

    fn unregister_client_locked(
        &self,
        ctx: &CallContext,
        handle: &RemoteObjectHandle,
    ) -> std::result::Result<(), StatusCode> {
        let mut state = self.state.lock();
        let object = state.object(handle, ctx.association)?;
        let name = match std::mem::replace(&mut object.phase, Phase::Unregistered) {
            Phase::Registered(registration) => registration.name,
            other => {
                object.phase = other;
                return Err(E_ACCESSDENIED);
            }
        };
        object.wake.notify_waiters();
        state.registrations -= 1;
        state.close_channels_of(handle);
        info!("Unregistered {}", name);
        Ok(())
    }
}

impl Default for NotificationServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteObjectHandler for NotificationServer {
    async fn create(&self, ctx: &CallContext) -> Result<CreateResponse> {
        let mut state = self.state.lock();
        if state.shutdown {
            return Ok(CreateResponse {
                remote_object: RemoteObjectHandle::nil(),
                status: E_ACCESSDENIED,
            });
        }
        let handle = RemoteObjectHandle::generate();
        state.objects.insert(
            handle,
            RemoteObject {
                association: ctx.association,
                phase: Phase::Idle,
                outstanding: false,
                wake: Arc::new(Notify::new()),
            },
        );
        debug!("Created remote object {:?} on association {}", handle, ctx.association);
        Ok(CreateResponse {
            remote_object: handle,
            status: StatusCode::S_OK,
        })
    }

    async fn delete(&self, ctx: &CallContext, request: DeleteRequest) -> Result<DeleteResponse> {
        let handle = request.remote_object;
        let mut state = self.state.lock();
        state
            .object(&handle, ctx.association)
            .map_err(RpcError::Fault)?;
        if let Some(object) = state.objects.remove(&handle) {
            if matches!(object.phase, Phase::Registered(_)) {
                state.registrations -= 1;
            }
            object.wake.notify_waiters();
        }
        state.forget_channels_of(&handle);
        debug!("Deleted remote object {:?}", handle);
        Ok(DeleteResponse {
            remote_object: RemoteObjectHandle::nil(),
        })
    }
}

#[async_trait]
impl AsyncNotifyHandler for NotificationServer {
    async fn register_client(
        &self,
        ctx: &CallContext,
        request: RegisterClientRequest,
    ) -> Result<RegisterClientResponse> {
        let status = match self.register_client_locked(ctx, &request) {
            Ok(()) => StatusCode::S_OK,
            Err(status) => status,
        };
        Ok(RegisterClientResponse::status(status))
    }

    async fn unregister_client(&self, ctx: &CallContext, request: RemoteObjectRequest) -> Result<StatusResponse> {
        let status = match self.unregister_client_locked(ctx, &request.remote_object) {
            Ok(()) => StatusCode::S_OK,
            Err(status) => status,
        };
        Ok(StatusResponse { status })
    }

    async fn get_new_channel(
        &self,
        ctx: &CallContext,
        request: RemoteObjectRequest,
    ) -> Result<GetNewChannelResponse> {
        Ok(match self.new_channels(request.remote_object, ctx.association).await {
            Ok(channels) => GetNewChannelResponse::channels(channels),
            Err(status) => GetNewChannelResponse::status(status),
        })
    }

    async fn get_notification_send_response(
        &self,
        ctx: &CallContext,
        request: GetNotificationSendResponseRequest,
    ) -> Result<GetNotificationSendResponseResponse> {
        let channel = request.channel;
        Ok(match self.exchange(channel, ctx.association, request.response()).await {
            Ok(notification) => GetNotificationSendResponseResponse::notification(channel, &notification),
            Err(status) if is_closing(status) => {
                GetNotificationSendResponseResponse::status(NotifyObjectHandle::nil(), status)
            }
            Err(status) => GetNotificationSendResponseResponse::status(channel, status),
        })
    }

    async fn get_notification(
        &self,
        ctx: &CallContext,
        request: RemoteObjectRequest,
    ) -> Result<GetNotificationResponse> {
        Ok(match self.next_notification(request.remote_object, ctx.association).await {
            Ok(notification) => GetNotificationResponse::notification(&notification),
            Err(status) => GetNotificationResponse::status(status),
        })
    }

    async fn close_channel(&self, ctx: &CallContext, request: CloseChannelRequest) -> Result<CloseChannelResponse> {
        let reason = Notification::new(request.notification_type, payload_bytes(&request.reason));
        Ok(match self.close(request.channel, ctx.association, reason) {
            Ok(()) => CloseChannelResponse {
                channel: NotifyObjectHandle::nil(),
                status: StatusCode::S_OK,
            },
            Err(status) => CloseChannelResponse {
                channel: request.channel,
                status,
            },
        })
    }
}

fn is_closing(status: StatusCode) -> bool {
    status == E_NOTIFICATIONS_TERMINATED || status == E_NOTIFICATION_CHANNEL_CLOSED
}
