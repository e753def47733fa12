//! Notification Tests - MS-PAN over the in-process transport
//!
//! These tests exercise:
//! - Unidirectional registrations and blocking GetNotification
//! - Bidirectional channels, responses and CloseChannel
//! - Unregister, close and shutdown releasing blocked calls
//! - Handles rejected after their terminal operation or on another association

mod common;

use std::sync::Arc;

use common::*;
use dcerpc::{RpcError, StatusCode};
use midl_ndr::Uuid;
use msrpc::pan::async_notify::AsyncNotifyClient;
use msrpc::pan::remote_object::RemoteObjectClient;
use msrpc::pan::{status, ConversationStyle, NotificationServer, Notification, RemoteObjectHandle, UserFilter};

const PRINTER: &str = "\\\\printserver\\Accounting";

struct Fixture {
    server: Arc<NotificationServer>,
    transport: dcerpc::LocalTransport,
}

async fn fixture() -> Fixture {
    init_logging();
    let (rpc, transport) = local_server();
    let server = Arc::new(NotificationServer::new());
    server.register(&rpc).await;
    Fixture { server, transport }
}

/// One client association: its remote object proxy and notification proxy
struct Session {
    objects: RemoteObjectClient,
    notify: AsyncNotifyClient,
}

impl Fixture {
    async fn session(&self) -> Session {
        let objects = RemoteObjectClient::connect(&self.transport).await.unwrap();
        let notify = objects.async_notify().await.unwrap();
        Session { objects, notify }
    }
}

impl Session {
    async fn registered(&self, notification_type: Uuid, filter: UserFilter, style: ConversationStyle) -> RemoteObjectHandle {
        let handle = self.objects.create().await.unwrap();
        self.notify
            .register_client(handle, PRINTER, notification_type, filter, style)
            .await
            .unwrap();
        handle
    }
}

fn status_of(result: Result<impl std::fmt::Debug, RpcError>) -> StatusCode {
    match result {
        Err(err) => err.status().unwrap_or_else(|| panic!("no status in {}", err)),
        Ok(value) => panic!("expected a failure, got {:?}", value),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_get_notification_blocks_until_published() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;

    let notify = session.notify.clone();
    let waiting = tokio::spawn(async move { notify.get_notification(handle).await });
    assert_blocked(&waiting).await;

    assert_eq!(fx.server.notify(kind, UserFilter::PerUser, b"job 1 printed".to_vec()), 1);
    let notification = within(waiting).await.unwrap().unwrap();
    assert_eq!(notification, Notification::new(kind, b"job 1 printed".to_vec()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_second_get_notification_is_not_stale() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;

    fx.server.notify(kind, UserFilter::AllUsers, b"first".to_vec());
    let first = within(session.notify.get_notification(handle)).await.unwrap();
    assert_eq!(first.data, b"first");

    let notify = session.notify.clone();
    let second = tokio::spawn(async move { notify.get_notification(handle).await });
    assert_blocked(&second).await;

    fx.server.notify(kind, UserFilter::AllUsers, b"second".to_vec());
    let second = within(second).await.unwrap().unwrap();
    assert_eq!(second.data, b"second");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_buffered_notifications_arrive_in_order() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;

    for i in 0..3u8 {
        fx.server.notify(kind, UserFilter::AllUsers, vec![i]);
    }
    for i in 0..3u8 {
        let notification = within(session.notify.get_notification(handle)).await.unwrap();
        assert_eq!(notification.data, vec![i]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_overlapping_call_on_handle_is_rejected() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;

    let notify = session.notify.clone();
    let waiting = tokio::spawn(async move { notify.get_notification(handle).await });
    assert_blocked(&waiting).await;

    let overlap = within(session.notify.get_notification(handle)).await;
    assert_eq!(status_of(overlap), status::E_CALL_OUTSTANDING);

    fx.server.notify(kind, UserFilter::AllUsers, b"done".to_vec());
    assert_eq!(within(waiting).await.unwrap().unwrap().data, b"done");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unregister_releases_blocked_call() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;

    let notify = session.notify.clone();
    let waiting = tokio::spawn(async move { notify.get_notification(handle).await });
    assert_blocked(&waiting).await;

    within(session.notify.unregister_client(handle)).await.unwrap();
    let released = within(waiting).await.unwrap();
    assert_eq!(status_of(released), status::E_NOTIFICATIONS_TERMINATED);
    assert_eq!(fx.server.registrations(), 0);

    // terminal: no further use of the registration
    assert_eq!(
        status_of(session.notify.get_notification(handle).await),
        status::E_ACCESSDENIED
    );
    assert_eq!(
        status_of(session.notify.unregister_client(handle).await),
        status::E_ACCESSDENIED
    );
    let reregister = session
        .notify
        .register_client(handle, PRINTER, kind, UserFilter::AllUsers, ConversationStyle::Unidirectional)
        .await;
    assert_eq!(status_of(reregister), status::E_ACCESSDENIED);

    let nil = session.objects.delete(handle).await.unwrap();
    assert!(nil.is_nil());
    let err = session.objects.delete(handle).await.unwrap_err();
    assert!(matches!(err, RpcError::Fault(code) if code == StatusCode::E_ACCESSDENIED), "{}", err);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_handles_stay_on_their_association() {
    let fx = fixture().await;
    let owner = fx.session().await;
    let intruder = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = owner.registered(kind, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;

    fx.server.notify(kind, UserFilter::AllUsers, b"private".to_vec());
    assert_eq!(
        status_of(intruder.notify.get_notification(handle).await),
        status::E_ACCESSDENIED
    );
    assert_eq!(
        status_of(intruder.notify.unregister_client(handle).await),
        status::E_ACCESSDENIED
    );
    assert!(intruder.objects.delete(handle).await.is_err());

    // the owner still has its notification
    let notification = within(owner.notify.get_notification(handle)).await.unwrap();
    assert_eq!(notification.data, b"private");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_bidirectional_exchange() {
    let fx = fixture().await;
    let mut responses = fx.server.take_responses().unwrap();
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Bidirectional).await;

    let notify = session.notify.clone();
    let waiting = tokio::spawn(async move { notify.get_new_channel(handle).await });
    assert_blocked(&waiting).await;

    assert_eq!(fx.server.notify(kind, UserFilter::AllUsers, b"paper jam".to_vec()), 1);
    let channels = within(waiting).await.unwrap().unwrap();
    assert_eq!(channels.len(), 1);
    let channel = channels[0];

    let (same, first) = within(session.notify.get_notification_send_response(channel, None))
        .await
        .unwrap();
    assert_eq!(same, channel);
    assert_eq!(first, Notification::new(kind, b"paper jam".to_vec()));

    // the response travels with the call that waits for the next notification
    let notify = session.notify.clone();
    let reply = Notification::new(kind, b"cancel job".to_vec());
    let waiting = tokio::spawn(async move { notify.get_notification_send_response(channel, Some(&reply)).await });

    let forwarded = within(responses.recv()).await.unwrap();
    assert_eq!(forwarded.channel, channel);
    assert_eq!(forwarded.notification.data, b"cancel job");
    assert!(!forwarded.closing);
    assert_blocked(&waiting).await;

    fx.server.send(channel, b"job cancelled".to_vec()).unwrap();
    let (_, next) = within(waiting).await.unwrap().unwrap();
    assert_eq!(next.data, b"job cancelled");

    within(session.notify.close_channel(channel, kind, b"bye")).await.unwrap();
    let closing = within(responses.recv()).await.unwrap();
    assert!(closing.closing);
    assert_eq!(closing.notification.data, b"bye");

    let after_close = session.notify.get_notification_send_response(channel, None).await;
    assert_eq!(status_of(after_close), status::E_NOTIFICATION_CHANNEL_CLOSED);
    assert_eq!(
        status_of(session.notify.close_channel(channel, kind, b"").await),
        status::E_NOTIFICATION_CHANNEL_CLOSED
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_close_channel_while_call_is_blocked() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Bidirectional).await;

    fx.server.notify(kind, UserFilter::AllUsers, b"toner low".to_vec());
    let channel = within(session.notify.get_new_channel(handle)).await.unwrap()[0];
    within(session.notify.get_notification_send_response(channel, None))
        .await
        .unwrap();

    let notify = session.notify.clone();
    let waiting = tokio::spawn(async move { notify.get_notification_send_response(channel, None).await });
    assert_blocked(&waiting).await;

    within(session.notify.close_channel(channel, kind, b"")).await.unwrap();
    let released = within(waiting).await.unwrap();
    assert_eq!(status_of(released), status::E_NOTIFICATIONS_TERMINATED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_close_response_type_must_match() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let handle = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Bidirectional).await;

    fx.server.notify(kind, UserFilter::AllUsers, b"ready".to_vec());
    let channel = within(session.notify.get_new_channel(handle)).await.unwrap()[0];

    let wrong_type = session.notify.close_channel(channel, Uuid::new_v4(), b"").await;
    assert_eq!(status_of(wrong_type), status::E_NOTIFICATION_TYPE_MISMATCH);
    within(session.notify.close_channel(channel, kind, b"")).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_releases_every_waiter() {
    let fx = fixture().await;
    let session = fx.session().await;
    let polled = Uuid::new_v4();
    let channeled = Uuid::new_v4();
    let unidirectional = session.registered(polled, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;
    let bidirectional = session.registered(channeled, UserFilter::AllUsers, ConversationStyle::Bidirectional).await;

    let notify = session.notify.clone();
    let poll = tokio::spawn(async move { notify.get_notification(unidirectional).await });
    let notify = session.notify.clone();
    let channels = tokio::spawn(async move { notify.get_new_channel(bidirectional).await });
    assert_blocked(&poll).await;
    assert!(!channels.is_finished());

    fx.server.shutdown();
    assert_eq!(status_of(within(poll).await.unwrap()), status::E_NOTIFICATIONS_TERMINATED);
    assert_eq!(status_of(within(channels).await.unwrap()), status::E_NOTIFICATIONS_TERMINATED);

    assert_eq!(status_of(session.objects.create().await), status::E_ACCESSDENIED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_per_user_registration_filter() {
    let fx = fixture().await;
    let session = fx.session().await;
    let kind = Uuid::new_v4();
    let per_user = session.registered(kind, UserFilter::PerUser, ConversationStyle::Unidirectional).await;
    let all_users = session.registered(kind, UserFilter::AllUsers, ConversationStyle::Unidirectional).await;

    assert_eq!(fx.server.notify(kind, UserFilter::AllUsers, b"broadcast".to_vec()), 1);
    assert_eq!(fx.server.notify(kind, UserFilter::PerUser, b"mine".to_vec()), 2);

    assert_eq!(within(session.notify.get_notification(per_user)).await.unwrap().data, b"mine");
    assert_eq!(within(session.notify.get_notification(all_users)).await.unwrap().data, b"broadcast");
    assert_eq!(within(session.notify.get_notification(all_users)).await.unwrap().data, b"mine");
}

#[tokio::test]
async fn test_registration_name_rules() {
    let fx = fixture().await;
    let session = fx.session().await;
    let handle = session.objects.create().await.unwrap();
    let kind = Uuid::new_v4();

    let empty = session
        .notify
        .register_client(handle, "", kind, UserFilter::AllUsers, ConversationStyle::Unidirectional)
        .await;
    assert_eq!(status_of(empty), status::E_INVALID_NAME);

    let too_long = "p".repeat(261);
    let err = session
        .notify
        .register_client(handle, &too_long, kind, UserFilter::AllUsers, ConversationStyle::Unidirectional)
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Validation { .. }), "{}", err);
}
