//! Frame dispatch, fault policy, and broadcast semantics.

use std::sync::Arc;

use rstest::rstest;
use tokio::sync::mpsc::error::TryRecvError;

use crate::assistant::QueryResponder;
use crate::config::{FrameFaultPolicy, HandshakeAuth, RealtimeConfig};
use crate::ids::UserId;
use crate::realtime::{
    ConnectionRegistry, FrameOutcome, OutboundEvent, OutboundReceiver, RealtimeChannel,
};
use crate::store::adapters::memory::InMemoryDashboardStore;
use crate::store::domain::SenderType;
use crate::test_support::{client_user, fixed_clock, five_client_store, seeded_store};

const ROI_ANSWER: &str = "Based on your current data, your average ROI is 150%. This \
                          represents strong performance across your 5 active clients.";

fn channel(store: &InMemoryDashboardStore, config: RealtimeConfig) -> RealtimeChannel {
    let store = Arc::new(store.clone());
    let responder = QueryResponder::new(store.clone(), UserId::new("csm-1"))
        .expect("templates should compile");
    RealtimeChannel::new(
        Arc::new(ConnectionRegistry::new()),
        Arc::new(responder),
        store,
        fixed_clock(),
        config,
    )
}

fn conversation_frame(conversation: &str, content: &str) -> String {
    serde_json::json!({
        "type": "conversation_message",
        "conversationId": conversation,
        "senderId": "user-c1",
        "senderType": "user",
        "content": content,
    })
    .to_string()
}

fn assert_silent(receiver: &mut OutboundReceiver) {
    assert!(matches!(receiver.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn chat_answer_goes_to_the_asker_only() {
    let store = five_client_store();
    let channel = channel(&store, RealtimeConfig::default());
    let (asker, mut asker_rx) = channel.connect(None);
    let (_other, mut other_rx) = channel.connect(None);

    let outcome = channel
        .handle_text(asker, r#"{"type":"chat_message","query":"what's my roi"}"#)
        .await;

    assert_eq!(outcome, FrameOutcome::Handled);
    assert_eq!(
        asker_rx.try_recv().ok(),
        Some(OutboundEvent::ChatResponse {
            message: ROI_ANSWER.to_owned(),
            timestamp: "2024-03-01T09:00:00.000Z".to_owned(),
        })
    );
    assert_silent(&mut asker_rx);
    assert_silent(&mut other_rx);
}

#[tokio::test]
async fn conversation_message_reaches_every_open_connection_once() {
    let store = seeded_store();
    let channel = channel(&store, RealtimeConfig::default());
    let (sender, mut sender_rx) = channel.connect(None);
    let (_peer, mut peer_rx) = channel.connect(None);
    let (gone, mut gone_rx) = channel.connect(None);
    channel.disconnect(gone);

    let outcome = channel
        .handle_text(sender, &conversation_frame("conv-1", "Hello team"))
        .await;

    assert_eq!(outcome, FrameOutcome::Handled);
    for receiver in [&mut sender_rx, &mut peer_rx] {
        let Ok(OutboundEvent::NewMessage { message }) = receiver.try_recv() else {
            panic!("expected a new_message event");
        };
        assert_eq!(message.content, "Hello team");
        assert_eq!(message.sender_type, SenderType::User);
        assert!(!message.is_read);
        assert_silent(receiver);
    }
    assert!(matches!(gone_rx.try_recv(), Err(TryRecvError::Disconnected)));
    assert_eq!(store.message_count(), 1);
}

#[rstest]
#[case("not json")]
#[case(r#"{"type":"unknown_event"}"#)]
#[case(r#"{"type":"chat_message"}"#)]
#[case(r#"{"query":"roi"}"#)]
#[tokio::test]
async fn bad_frames_are_dropped_silently(#[case] frame: &str) {
    let store = seeded_store();
    let channel = channel(&store, RealtimeConfig::default());
    let (id, mut rx) = channel.connect(None);

    let outcome = channel.handle_text(id, frame).await;

    assert_eq!(outcome, FrameOutcome::Dropped);
    assert_eq!(channel.registry().len(), 1);
    assert_silent(&mut rx);
}

#[tokio::test]
async fn binary_frames_follow_the_fault_policy() {
    let store = seeded_store();
    let drop_channel = channel(&store, RealtimeConfig::default());
    let close_channel = channel(
        &store,
        RealtimeConfig {
            fault_policy: FrameFaultPolicy::Disconnect,
            ..RealtimeConfig::default()
        },
    );
    let (a, _rx_a) = drop_channel.connect(None);
    let (b, _rx_b) = close_channel.connect(None);

    assert_eq!(drop_channel.handle_binary(a), FrameOutcome::Dropped);
    assert_eq!(close_channel.handle_binary(b), FrameOutcome::Close);
}

#[tokio::test]
async fn disconnect_policy_closes_on_malformed_text() {
    let store = seeded_store();
    let channel = channel(
        &store,
        RealtimeConfig {
            fault_policy: FrameFaultPolicy::Disconnect,
            ..RealtimeConfig::default()
        },
    );
    let (id, _rx) = channel.connect(None);

    assert_eq!(channel.handle_text(id, "{").await, FrameOutcome::Close);
}

#[tokio::test]
async fn failed_write_broadcasts_nothing() {
    let store = seeded_store();
    let channel = channel(&store, RealtimeConfig::default());
    let (id, mut rx) = channel.connect(None);
    let (_peer, mut peer_rx) = channel.connect(None);

    let outcome = channel
        .handle_text(id, &conversation_frame("conv-missing", "Hello"))
        .await;

    assert_eq!(outcome, FrameOutcome::Rejected);
    assert_silent(&mut rx);
    assert_silent(&mut peer_rx);
    assert_eq!(store.message_count(), 0);
}

#[rstest]
#[case(Some("c1"), "conv-1", FrameOutcome::Handled)]
#[case(Some("c1"), "conv-2", FrameOutcome::Rejected)]
#[case(None, "conv-1", FrameOutcome::Rejected)]
#[tokio::test]
async fn bearer_handshake_authorizes_conversation_writes(
    #[case] client: Option<&str>,
    #[case] conversation: &str,
    #[case] expected: FrameOutcome,
) {
    let store = seeded_store();
    let channel = channel(
        &store,
        RealtimeConfig {
            handshake_auth: HandshakeAuth::RequireBearer,
            ..RealtimeConfig::default()
        },
    );
    let (id, _rx) = channel.connect(client.map(client_user));

    let outcome = channel
        .handle_text(id, &conversation_frame(conversation, "Hi"))
        .await;

    assert_eq!(outcome, expected);
}
