//! Shared fixtures for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::ids::{ActivityId, AssignmentId, ClientId, ConversationId, TestId, UserId};
use crate::identity::domain::{Role, User};
use crate::store::adapters::memory::InMemoryDashboardStore;
use crate::store::domain::{
    Activity, AssignmentStatus, Client, ClientStatus, Conversation, Test, TestAssignment,
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

pub(crate) fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(epoch()))
}

pub(crate) fn manager() -> User {
    User::new(UserId::new("csm-1"), "sarah", "Sarah Chen", Role::Manager, None)
}

pub(crate) fn client_user(client_id: &str) -> User {
    User::new(
        UserId::new(format!("user-{client_id}")),
        format!("{client_id}-admin"),
        "Client Admin",
        Role::Client,
        Some(ClientId::new(client_id)),
    )
}

pub(crate) fn unbound_client_user() -> User {
    User::new(UserId::new("user-x"), "drifter", "Unbound", Role::Client, None)
}

pub(crate) fn client(id: &str, status: ClientStatus, roi: Option<&str>) -> Client {
    Client {
        id: ClientId::new(id),
        name: format!("Client {id}"),
        industry: None,
        status,
        roi: roi.map(str::to_owned),
        csm_id: Some(UserId::new("csm-1")),
        created_at: epoch(),
    }
}

pub(crate) fn conversation(id: &str, client_id: &str) -> Conversation {
    Conversation {
        id: ConversationId::new(id),
        client_id: ClientId::new(client_id),
        csm_id: Some(UserId::new("csm-1")),
        subject: None,
        created_at: epoch(),
    }
}

pub(crate) fn activity(title: &str, minutes_after_epoch: i64) -> Activity {
    Activity {
        id: ActivityId::generate(),
        client_id: Some(ClientId::new("c1")),
        activity_type: "call".to_owned(),
        title: title.to_owned(),
        description: None,
        created_at: epoch() + TimeDelta::minutes(minutes_after_epoch),
    }
}

/// Two managed clients (`c1` active, `c2` at risk) each with one
/// conversation.
pub(crate) fn seeded_store() -> InMemoryDashboardStore {
    InMemoryDashboardStore::with_clock(fixed_clock())
        .with_client(client("c1", ClientStatus::Active, Some("150")))
        .with_client(client("c2", ClientStatus::AtRisk, Some("90")))
        .with_conversation(conversation("conv-1", "c1"))
        .with_conversation(conversation("conv-2", "c2"))
}

pub(crate) fn test(id: &str) -> Test {
    Test {
        id: TestId::new(id),
        title: format!("Test {id}"),
        description: None,
        created_by: UserId::new("csm-1"),
        created_at: epoch(),
    }
}

pub(crate) fn assignment(id: &str, client_id: &str, status: AssignmentStatus) -> TestAssignment {
    TestAssignment {
        id: AssignmentId::new(id),
        test_id: TestId::new("t1"),
        client_id: ClientId::new(client_id),
        status,
        score: None,
        assigned_at: epoch(),
        completed_at: None,
    }
}

/// Five active managed clients, each reporting 150% ROI.
pub(crate) fn five_client_store() -> InMemoryDashboardStore {
    (1..=5).fold(
        InMemoryDashboardStore::with_clock(fixed_clock()),
        |store, n| {
            store.with_client(client(&format!("c{n}"), ClientStatus::Active, Some("150")))
        },
    )
    .with_conversation(conversation("conv-1", "c1"))
}
