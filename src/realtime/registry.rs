//! The set of live realtime connections.
//!
//! One registry is constructed at startup and shared by reference. Each
//! connection owns an unbounded outbound queue; the registry holds the
//! sending half. Broadcast snapshots the senders under the lock and sends
//! after releasing it, so connects and disconnects never wait on delivery
//! and a connection removed mid-broadcast simply misses the event.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc;

use super::OutboundEvent;
use crate::identity::domain::User;

/// Identifier of a live connection.
///
/// Identifiers increase monotonically, so ordering by id is registration
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Sending half of a connection's outbound queue.
pub type OutboundSender = mpsc::UnboundedSender<OutboundEvent>;

/// Receiving half of a connection's outbound queue.
pub type OutboundReceiver = mpsc::UnboundedReceiver<OutboundEvent>;

#[derive(Debug)]
struct Peer {
    sender: OutboundSender,
    user: Option<User>,
}

#[derive(Debug, Default)]
struct RegistryState {
    next_id: u64,
    peers: BTreeMap<ConnectionId, Peer>,
}

/// Delivery summary of a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the event was queued for.
    pub delivered: Vec<ConnectionId>,
    /// Connections whose queue had already closed.
    pub failed: Vec<ConnectionId>,
}

/// Thread-safe set of live connections.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    state: RwLock<RegistryState>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection and returns its id and outbound queue.
    #[must_use]
    pub fn register(&self, user: Option<User>) -> (ConnectionId, OutboundReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = ConnectionId(state.next_id);
        state.next_id = state.next_id.saturating_add(1);
        state.peers.insert(id, Peer { sender, user });
        (id, receiver)
    }

    /// Removes a connection, dropping its queue. Returns `false` if it was
    /// already gone.
    pub fn unregister(&self, id: ConnectionId) -> bool {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .peers
            .remove(&id)
            .is_some()
    }

    /// Returns the user attached at handshake, if any.
    #[must_use]
    pub fn user(&self, id: ConnectionId) -> Option<User> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .peers
            .get(&id)
            .and_then(|peer| peer.user.clone())
    }

    /// Queues an event for one connection. Returns `false` if the connection
    /// is gone or its queue has closed.
    pub fn send_to(&self, id: ConnectionId, event: OutboundEvent) -> bool {
        let sender = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .peers
            .get(&id)
            .map(|peer| peer.sender.clone());
        sender.is_some_and(|tx| tx.send(event).is_ok())
    }

    /// Queues an event for every live connection in registration order.
    ///
    /// A closed queue is recorded in the report and never stops delivery to
    /// the remaining connections.
    pub fn broadcast(&self, event: &OutboundEvent) -> BroadcastReport {
        let snapshot = self.snapshot();
        let mut report = BroadcastReport::default();
        for (id, sender) in snapshot {
            if sender.send(event.clone()).is_ok() {
                report.delivered.push(id);
            } else {
                report.failed.push(id);
            }
        }
        report
    }

    /// Returns live connection ids in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<ConnectionId> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .peers
            .keys()
            .copied()
            .collect()
    }

    /// Returns the number of live connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .peers
            .len()
    }

    /// Returns `true` when no connection is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<(ConnectionId, OutboundSender)> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .peers
            .iter()
            .map(|(id, peer)| (*id, peer.sender.clone()))
            .collect()
    }
}
