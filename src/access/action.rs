//! Actions a caller may attempt.

use crate::ids::ClientId;

/// A resource action checked by [`super::AccessPolicy`].
///
/// Actions that touch a client-owned resource carry the owning client so
/// ownership can be decided without another storage read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Read aggregate dashboard metrics.
    ViewDashboard,
    /// List every client.
    ListAllClients,
    /// View a single client.
    ViewClient(&'a ClientId),
    /// Create a client.
    CreateClient,
    /// List conversations, optionally scoped to one client.
    ListConversations(Option<&'a ClientId>),
    /// Create a conversation for a client.
    CreateConversation(&'a ClientId),
    /// Read the messages of a conversation owned by a client.
    ViewConversation(&'a ClientId),
    /// Post a message into a conversation owned by a client.
    CreateMessage(&'a ClientId),
    /// List assessment tests.
    ListTests,
    /// Create an assessment test.
    CreateTest,
    /// Read a single assessment test.
    ViewTest,
    /// List, create, or update test assignments.
    ManageTestAssignments,
    /// Read or record ROI metrics.
    AccessRoiMetrics,
    /// Read or record activities.
    AccessActivities,
    /// Trigger the mailbox sync stub.
    SyncMailbox,
}

impl Action<'_> {
    /// Returns a stable name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ListAllClients => "list_all_clients",
            Self::ViewClient(_) => "view_client",
            Self::CreateClient => "create_client",
            Self::ListConversations(_) => "list_conversations",
            Self::CreateConversation(_) => "create_conversation",
            Self::ViewConversation(_) => "view_conversation",
            Self::CreateMessage(_) => "create_message",
            Self::ListTests => "list_tests",
            Self::CreateTest => "create_test",
            Self::ViewTest => "view_test",
            Self::ManageTestAssignments => "manage_test_assignments",
            Self::AccessRoiMetrics => "access_roi_metrics",
            Self::AccessActivities => "access_activities",
            Self::SyncMailbox => "sync_mailbox",
        }
    }

    /// Returns `false` for actions open to anonymous callers.
    #[must_use]
    pub const fn requires_authentication(&self) -> bool {
        !matches!(
            self,
            Self::ViewTest | Self::AccessRoiMetrics | Self::AccessActivities | Self::SyncMailbox
        )
    }

    /// Returns the client whose ownership a client-role caller must hold.
    ///
    /// `None` means no ownership rule applies to the action. Test
    /// assignments deliberately carry no owner: any authenticated caller may
    /// manage any assignment.
    #[must_use]
    pub const fn owner(&self) -> Option<&ClientId> {
        match self {
            Self::ViewClient(id)
            | Self::CreateConversation(id)
            | Self::ViewConversation(id)
            | Self::CreateMessage(id)
            | Self::ListConversations(Some(id)) => Some(*id),
            _ => None,
        }
    }

    /// Returns `true` when client-role callers are checked for ownership.
    #[must_use]
    pub const fn ownership_enforced(&self) -> bool {
        self.owner().is_some()
    }

    /// Returns `true` when only managers may perform the action.
    #[must_use]
    pub const fn manager_only(&self) -> bool {
        matches!(
            self,
            Self::ListAllClients
                | Self::CreateClient
                | Self::ListConversations(None)
                | Self::ListTests
                | Self::CreateTest
        )
    }
}
