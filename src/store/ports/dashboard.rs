//! Storage port covering every record the dashboard reads or writes.

use crate::ids::{AssignmentId, ClientId, ConversationId, TestId, UserId};
use crate::store::{
    domain::{
        Activity, AssignmentFilter, Client, Conversation, ConversationFilter, DashboardMetrics,
        Message, NewActivity, NewClient, NewConversation, NewMessage, NewRoiMetric, NewTest,
        NewTestAssignment, RoiMetric, Test, TestAssignment, TestAssignmentPatch,
    },
    error::StoreResult,
};
use async_trait::async_trait;

/// Port for dashboard persistence operations.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Every stored message references an existing conversation
/// - Every stored conversation references an existing client
/// - Messages are append-only apart from their read flag
/// - Concurrent access is handled safely
///
/// Calls are single-shot: no retries or timeouts are applied by callers, and
/// a failure surfaces immediately to the one request or event in flight.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Aggregates headline metrics for the clients of one manager.
    async fn dashboard_metrics(&self, csm_id: &UserId) -> StoreResult<DashboardMetrics>;

    /// Lists clients, restricted to one manager when `csm_id` is set.
    async fn list_clients(&self, csm_id: Option<&UserId>) -> StoreResult<Vec<Client>>;

    /// Finds a client by identifier.
    async fn find_client(&self, id: &ClientId) -> StoreResult<Option<Client>>;

    /// Stores a new client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::Validation`] for an invalid payload.
    async fn create_client(&self, client: NewClient) -> StoreResult<Client>;

    /// Lists conversations matching the filter.
    async fn list_conversations(&self, filter: &ConversationFilter)
    -> StoreResult<Vec<Conversation>>;

    /// Finds a conversation by identifier.
    async fn find_conversation(&self, id: &ConversationId) -> StoreResult<Option<Conversation>>;

    /// Opens a new conversation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::MissingReference`] when the client
    /// does not exist.
    async fn create_conversation(&self, conversation: NewConversation)
    -> StoreResult<Conversation>;

    /// Lists the messages of a conversation in creation order.
    async fn list_messages(&self, conversation_id: &ConversationId) -> StoreResult<Vec<Message>>;

    /// Appends a message to a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::MissingReference`] when the
    /// conversation does not exist.
    async fn create_message(&self, message: NewMessage) -> StoreResult<Message>;

    /// Lists tests, restricted to one author when `created_by` is set.
    async fn list_tests(&self, created_by: Option<&UserId>) -> StoreResult<Vec<Test>>;

    /// Finds a test by identifier.
    async fn find_test(&self, id: &TestId) -> StoreResult<Option<Test>>;

    /// Stores a new test.
    async fn create_test(&self, test: NewTest) -> StoreResult<Test>;

    /// Lists assignments matching the filter.
    async fn list_test_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> StoreResult<Vec<TestAssignment>>;

    /// Assigns a test to a client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::MissingReference`] when the test
    /// or client does not exist.
    async fn create_test_assignment(
        &self,
        assignment: NewTestAssignment,
    ) -> StoreResult<TestAssignment>;

    /// Applies a partial update; returns `None` when the assignment is
    /// unknown.
    async fn update_test_assignment(
        &self,
        id: &AssignmentId,
        patch: TestAssignmentPatch,
    ) -> StoreResult<Option<TestAssignment>>;

    /// Lists ROI measurements, restricted to one client when set.
    async fn list_roi_metrics(&self, client_id: Option<&ClientId>) -> StoreResult<Vec<RoiMetric>>;

    /// Records an ROI measurement.
    async fn create_roi_metric(&self, metric: NewRoiMetric) -> StoreResult<RoiMetric>;

    /// Lists at most `limit` activities, most recent first.
    async fn list_activities(
        &self,
        client_id: Option<&ClientId>,
        limit: usize,
    ) -> StoreResult<Vec<Activity>>;

    /// Logs an activity.
    async fn create_activity(&self, activity: NewActivity) -> StoreResult<Activity>;
}
