//! Deterministic demo dataset.
//!
//! One manager (`sarah`) looks after four clients; `acme` and `globex` are
//! client-side users bound to `c1` and `c2`. All accounts share
//! [`DEMO_PASSWORD`].

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::config::DEFAULT_MANAGER_ID;
use crate::identity::{
    adapters::memory::InMemorySessionStore,
    domain::{Role, User},
};
use crate::ids::{
    ActivityId, AssignmentId, ClientId, ConversationId, MessageId, RoiMetricId, TestId, UserId,
};
use crate::store::{
    adapters::memory::InMemoryDashboardStore,
    domain::{
        Activity, AssignmentStatus, ClientStatus, Conversation, Message, MessageKind, NewClient,
        RoiMetric, SenderType, Test, TestAssignment,
    },
};

/// Password of every demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// Seeded ports ready to hand to [`crate::api::AppState::new`].
#[derive(Debug, Clone)]
pub struct DemoData {
    /// Dashboard records.
    pub store: InMemoryDashboardStore,
    /// Accounts, no sessions yet.
    pub sessions: InMemorySessionStore,
}

/// Returns the demo accounts.
///
/// `pending` is a client-role account not yet bound to any client.
#[must_use]
pub fn users() -> Vec<User> {
    vec![
        User::new(
            UserId::new(DEFAULT_MANAGER_ID),
            "sarah",
            "Sarah Chen",
            Role::Manager,
            None,
        ),
        User::new(
            UserId::new("client-user-1"),
            "acme",
            "Alex Rivera",
            Role::Client,
            Some(ClientId::new("c1")),
        ),
        User::new(
            UserId::new("client-user-2"),
            "globex",
            "Jordan Lee",
            Role::Client,
            Some(ClientId::new("c2")),
        ),
        User::new(
            UserId::new("client-user-3"),
            "pending",
            "Sam Patel",
            Role::Client,
            None,
        ),
    ]
}

/// Builds the demo dataset with timestamps relative to `clock`.
pub fn seed(clock: &(impl Clock + ?Sized)) -> DemoData {
    let now = clock.utc();
    let sessions = users()
        .into_iter()
        .fold(InMemorySessionStore::new(), |accounts, user| {
            accounts.with_account(user, DEMO_PASSWORD)
        });
    let clients = seed_clients(InMemoryDashboardStore::new(), now);
    let store = seed_engagement(
        seed_assessments(seed_conversations(clients, now), now),
        now,
    );
    DemoData { store, sessions }
}

fn manager() -> UserId {
    UserId::new(DEFAULT_MANAGER_ID)
}

fn seed_clients(store: InMemoryDashboardStore, now: DateTime<Utc>) -> InMemoryDashboardStore {
    let clients = [
        ("c1", "Acme Corp", "Technology", ClientStatus::Active, Some("245")),
        ("c2", "Globex", "Healthcare", ClientStatus::Active, Some("180")),
        ("c3", "Initech", "Finance", ClientStatus::AtRisk, Some("95")),
        ("c4", "Umbrella Retail", "Retail", ClientStatus::Onboarding, None),
    ];
    clients
        .into_iter()
        .fold(store, |seeded, (id, name, industry, status, roi)| {
            let mut client = NewClient::new(name).with_status(status).with_csm(manager());
            client.industry = Some(industry.to_owned());
            client.roi = roi.map(str::to_owned);
            seeded.with_client(client.into_client(ClientId::new(id), now - TimeDelta::days(90)))
        })
}

fn seed_conversations(store: InMemoryDashboardStore, now: DateTime<Utc>) -> InMemoryDashboardStore {
    let conversation = |id: &str, client: &str, subject: &str| Conversation {
        id: ConversationId::new(id),
        client_id: ClientId::new(client),
        csm_id: Some(manager()),
        subject: Some(subject.to_owned()),
        created_at: now - TimeDelta::days(7),
    };
    let message = |id: &str, conversation_id: &str, sender: &str, kind: SenderType, body: &str| {
        Message {
            id: MessageId::new(id),
            conversation_id: ConversationId::new(conversation_id),
            sender_id: sender.to_owned(),
            sender_type: kind,
            content: body.to_owned(),
            message_type: MessageKind::Text,
            is_read: kind == SenderType::Assistant,
            created_at: now - TimeDelta::hours(2),
        }
    };
    store
        .with_conversation(conversation("conv-1", "c1", "Q2 rollout"))
        .with_conversation(conversation("conv-2", "c2", "Renewal planning"))
        .with_message(message(
            "m1",
            "conv-1",
            "client-user-1",
            SenderType::User,
            "Can we review the rollout timeline?",
        ))
        .with_message(message(
            "m2",
            "conv-1",
            "assistant",
            SenderType::Assistant,
            "The rollout is on track for the end of the quarter.",
        ))
        .with_message(message(
            "m3",
            "conv-2",
            "client-user-2",
            SenderType::User,
            "Please send the renewal proposal.",
        ))
}

fn seed_assessments(store: InMemoryDashboardStore, now: DateTime<Utc>) -> InMemoryDashboardStore {
    let test = |id: &str, title: &str| Test {
        id: TestId::new(id),
        title: title.to_owned(),
        description: None,
        created_by: manager(),
        created_at: now - TimeDelta::days(30),
    };
    let assignment = |id: &str, test_id: &str, client: &str, status, score| TestAssignment {
        id: AssignmentId::new(id),
        test_id: TestId::new(test_id),
        client_id: ClientId::new(client),
        status,
        score,
        assigned_at: now - TimeDelta::days(14),
        completed_at: (status == AssignmentStatus::Completed).then(|| now - TimeDelta::days(2)),
    };
    store
        .with_test(test("t1", "Onboarding Health Check"))
        .with_test(test("t2", "Quarterly Satisfaction Survey"))
        .with_assignment(assignment("a1", "t1", "c1", AssignmentStatus::Completed, Some(92)))
        .with_assignment(assignment("a2", "t2", "c1", AssignmentStatus::InProgress, None))
        .with_assignment(assignment("a3", "t1", "c2", AssignmentStatus::Completed, Some(85)))
        .with_assignment(assignment("a4", "t2", "c3", AssignmentStatus::Pending, None))
}

fn seed_engagement(store: InMemoryDashboardStore, now: DateTime<Utc>) -> InMemoryDashboardStore {
    let metric = |id: &str, client: &str, kind: &str, value: &str| RoiMetric {
        id: RoiMetricId::new(id),
        client_id: ClientId::new(client),
        metric_type: kind.to_owned(),
        value: value.to_owned(),
        period: "2024-Q1".to_owned(),
        recorded_at: now - TimeDelta::days(20),
    };
    let activity = |id: &str, client: &str, kind: &str, title: &str, hours: i64| Activity {
        id: ActivityId::new(id),
        client_id: Some(ClientId::new(client)),
        activity_type: kind.to_owned(),
        title: title.to_owned(),
        description: None,
        created_at: now - TimeDelta::hours(hours),
    };
    store
        .with_roi_metric(metric("r1", "c1", "cost_savings", "125000"))
        .with_roi_metric(metric("r2", "c2", "revenue_growth", "18.5"))
        .with_activity(activity("act-1", "c1", "call", "Quarterly review with Acme Corp", 3))
        .with_activity(activity("act-2", "c2", "email", "Renewal proposal sent to Globex", 26))
        .with_activity(activity("act-3", "c3", "meeting", "Risk mitigation plan for Initech", 50))
        .with_activity(activity("act-4", "c4", "demo", "Product demo for Umbrella Retail", 75))
}
