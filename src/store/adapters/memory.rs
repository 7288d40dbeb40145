//! In-memory implementation of the `DashboardStore` port.
//!
//! Provides a simple, thread-safe store for tests and the demo server
//! without database dependencies. Records keep insertion order.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::ids::{
    ActivityId, AssignmentId, ClientId, ConversationId, MessageId, RoiMetricId, TestId, UserId,
};
use crate::store::{
    domain::{
        Activity, AssignmentFilter, AssignmentStatus, Client, Conversation, ConversationFilter,
        DashboardMetrics, Message, NewActivity, NewClient, NewConversation, NewMessage,
        NewRoiMetric, NewTest, NewTestAssignment, RoiMetric, SenderType, Test, TestAssignment,
        TestAssignmentPatch, parse_decimal,
    },
    error::{StoreError, StoreResult},
    ports::DashboardStore,
};

#[derive(Debug, Default)]
struct StoreState {
    clients: Vec<Client>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    tests: Vec<Test>,
    assignments: Vec<TestAssignment>,
    roi_metrics: Vec<RoiMetric>,
    activities: Vec<Activity>,
}

impl StoreState {
    fn client_exists(&self, id: &ClientId) -> bool {
        self.clients.iter().any(|client| client.id == *id)
    }

    fn managed_clients<'a>(&'a self, csm_id: &'a UserId) -> impl Iterator<Item = &'a Client> {
        self.clients
            .iter()
            .filter(move |client| client.csm_id.as_ref() == Some(csm_id))
    }
}

/// In-memory implementation of [`DashboardStore`].
///
/// Thread-safe via internal [`RwLock`]; clones share the same records.
///
/// # Example
///
/// ```
/// use pulseboard::store::adapters::memory::InMemoryDashboardStore;
///
/// let store = InMemoryDashboardStore::new();
/// assert_eq!(store.client_count(), 0);
/// ```
#[derive(Clone)]
pub struct InMemoryDashboardStore {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for InMemoryDashboardStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl std::fmt::Debug for InMemoryDashboardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDashboardStore")
            .field("clients", &self.client_count())
            .finish_non_exhaustive()
    }
}

impl InMemoryDashboardStore {
    /// Creates an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store stamped by the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            clock,
        }
    }

    /// Inserts a fully formed client record.
    #[must_use]
    pub fn with_client(self, client: Client) -> Self {
        self.seed(|state| state.clients.push(client));
        self
    }

    /// Inserts a fully formed conversation record.
    #[must_use]
    pub fn with_conversation(self, conversation: Conversation) -> Self {
        self.seed(|state| state.conversations.push(conversation));
        self
    }

    /// Inserts a fully formed message record.
    #[must_use]
    pub fn with_message(self, message: Message) -> Self {
        self.seed(|state| state.messages.push(message));
        self
    }

    /// Inserts a fully formed test record.
    #[must_use]
    pub fn with_test(self, test: Test) -> Self {
        self.seed(|state| state.tests.push(test));
        self
    }

    /// Inserts a fully formed assignment record.
    #[must_use]
    pub fn with_assignment(self, assignment: TestAssignment) -> Self {
        self.seed(|state| state.assignments.push(assignment));
        self
    }

    /// Inserts a fully formed ROI record.
    #[must_use]
    pub fn with_roi_metric(self, metric: RoiMetric) -> Self {
        self.seed(|state| state.roi_metrics.push(metric));
        self
    }

    /// Inserts a fully formed activity record.
    #[must_use]
    pub fn with_activity(self, activity: Activity) -> Self {
        self.seed(|state| state.activities.push(activity));
        self
    }

    /// Returns the number of stored clients.
    ///
    /// Recovers from a poisoned lock, since the count is informational.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clients
            .len()
    }

    /// Returns the number of stored messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .messages
            .len()
    }

    fn seed(&self, apply: impl FnOnce(&mut StoreState)) {
        apply(&mut self.state.write().unwrap_or_else(PoisonError::into_inner));
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|e| StoreError::persistence(std::io::Error::other(e.to_string())))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|e| StoreError::persistence(std::io::Error::other(e.to_string())))
    }
}

/// Formats an average ROI as a whole percentage, e.g. `"150%"`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "ROI averages are presentational and tolerate float rounding"
)]
fn format_average_roi(values: &[f64]) -> String {
    if values.is_empty() {
        return "0%".to_owned();
    }
    let average = values.iter().sum::<f64>() / values.len() as f64;
    format!("{average:.0}%")
}

#[async_trait]
impl DashboardStore for InMemoryDashboardStore {
    async fn dashboard_metrics(&self, csm_id: &UserId) -> StoreResult<DashboardMetrics> {
        let state = self.read()?;

        let managed: Vec<&Client> = state.managed_clients(csm_id).collect();
        let active_clients = managed.iter().filter(|client| client.is_active()).count();
        let roi_values: Vec<f64> = managed
            .iter()
            .filter_map(|client| client.roi.as_deref().and_then(parse_decimal))
            .collect();
        let active_tests = state
            .assignments
            .iter()
            .filter(|assignment| assignment.status == AssignmentStatus::InProgress)
            .filter(|assignment| managed.iter().any(|c| c.id == assignment.client_id))
            .count();
        let managed_conversations: Vec<&ConversationId> = state
            .conversations
            .iter()
            .filter(|conversation| managed.iter().any(|c| c.id == conversation.client_id))
            .map(|conversation| &conversation.id)
            .collect();
        let unread_messages = state
            .messages
            .iter()
            .filter(|message| !message.is_read && message.sender_type == SenderType::User)
            .filter(|message| managed_conversations.contains(&&message.conversation_id))
            .count();

        Ok(DashboardMetrics {
            active_clients,
            avg_roi: format_average_roi(&roi_values),
            active_tests,
            unread_messages,
        })
    }

    async fn list_clients(&self, csm_id: Option<&UserId>) -> StoreResult<Vec<Client>> {
        let state = self.read()?;
        Ok(state
            .clients
            .iter()
            .filter(|client| csm_id.is_none_or(|id| client.csm_id.as_ref() == Some(id)))
            .cloned()
            .collect())
    }

    async fn find_client(&self, id: &ClientId) -> StoreResult<Option<Client>> {
        let state = self.read()?;
        Ok(state.clients.iter().find(|client| client.id == *id).cloned())
    }

    async fn create_client(&self, client: NewClient) -> StoreResult<Client> {
        client.validate()?;
        let record = client.into_client(ClientId::generate(), self.clock.utc());
        self.write()?.clients.push(record.clone());
        Ok(record)
    }

    async fn list_conversations(
        &self,
        filter: &ConversationFilter,
    ) -> StoreResult<Vec<Conversation>> {
        let state = self.read()?;
        Ok(state
            .conversations
            .iter()
            .filter(|conversation| filter.matches(conversation))
            .cloned()
            .collect())
    }

    async fn find_conversation(&self, id: &ConversationId) -> StoreResult<Option<Conversation>> {
        let state = self.read()?;
        Ok(state
            .conversations
            .iter()
            .find(|conversation| conversation.id == *id)
            .cloned())
    }

    async fn create_conversation(
        &self,
        conversation: NewConversation,
    ) -> StoreResult<Conversation> {
        conversation.validate()?;
        let mut state = self.write()?;
        if !state.client_exists(&conversation.client_id) {
            return Err(StoreError::missing("client", &conversation.client_id));
        }
        let record = conversation.into_conversation(ConversationId::generate(), self.clock.utc());
        state.conversations.push(record.clone());
        Ok(record)
    }

    async fn list_messages(&self, conversation_id: &ConversationId) -> StoreResult<Vec<Message>> {
        let state = self.read()?;
        Ok(state
            .messages
            .iter()
            .filter(|message| message.conversation_id == *conversation_id)
            .cloned()
            .collect())
    }

    async fn create_message(&self, message: NewMessage) -> StoreResult<Message> {
        message.validate()?;
        let mut state = self.write()?;
        if !state
            .conversations
            .iter()
            .any(|conversation| conversation.id == message.conversation_id)
        {
            return Err(StoreError::missing(
                "conversation",
                &message.conversation_id,
            ));
        }
        let record = message.into_message(MessageId::generate(), self.clock.utc());
        state.messages.push(record.clone());
        Ok(record)
    }

    async fn list_tests(&self, created_by: Option<&UserId>) -> StoreResult<Vec<Test>> {
        let state = self.read()?;
        Ok(state
            .tests
            .iter()
            .filter(|test| created_by.is_none_or(|author| test.created_by == *author))
            .cloned()
            .collect())
    }

    async fn find_test(&self, id: &TestId) -> StoreResult<Option<Test>> {
        let state = self.read()?;
        Ok(state.tests.iter().find(|test| test.id == *id).cloned())
    }

    async fn create_test(&self, test: NewTest) -> StoreResult<Test> {
        test.validate()?;
        let record = test.into_test(TestId::generate(), self.clock.utc());
        self.write()?.tests.push(record.clone());
        Ok(record)
    }

    async fn list_test_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> StoreResult<Vec<TestAssignment>> {
        let state = self.read()?;
        Ok(state
            .assignments
            .iter()
            .filter(|assignment| filter.matches(assignment))
            .cloned()
            .collect())
    }

    async fn create_test_assignment(
        &self,
        assignment: NewTestAssignment,
    ) -> StoreResult<TestAssignment> {
        assignment.validate()?;
        let mut state = self.write()?;
        if !state.tests.iter().any(|test| test.id == assignment.test_id) {
            return Err(StoreError::missing("test", &assignment.test_id));
        }
        if !state.client_exists(&assignment.client_id) {
            return Err(StoreError::missing("client", &assignment.client_id));
        }
        let record = assignment.into_assignment(AssignmentId::generate(), self.clock.utc());
        state.assignments.push(record.clone());
        Ok(record)
    }

    async fn update_test_assignment(
        &self,
        id: &AssignmentId,
        patch: TestAssignmentPatch,
    ) -> StoreResult<Option<TestAssignment>> {
        patch.validate()?;
        let mut state = self.write()?;
        let Some(assignment) = state
            .assignments
            .iter_mut()
            .find(|assignment| assignment.id == *id)
        else {
            return Ok(None);
        };
        assignment.apply(patch);
        Ok(Some(assignment.clone()))
    }

    async fn list_roi_metrics(&self, client_id: Option<&ClientId>) -> StoreResult<Vec<RoiMetric>> {
        let state = self.read()?;
        Ok(state
            .roi_metrics
            .iter()
            .filter(|metric| client_id.is_none_or(|id| metric.client_id == *id))
            .cloned()
            .collect())
    }

    async fn create_roi_metric(&self, metric: NewRoiMetric) -> StoreResult<RoiMetric> {
        metric.validate()?;
        let mut state = self.write()?;
        if !state.client_exists(&metric.client_id) {
            return Err(StoreError::missing("client", &metric.client_id));
        }
        let record = metric.into_metric(RoiMetricId::generate(), self.clock.utc());
        state.roi_metrics.push(record.clone());
        Ok(record)
    }

    async fn list_activities(
        &self,
        client_id: Option<&ClientId>,
        limit: usize,
    ) -> StoreResult<Vec<Activity>> {
        let state = self.read()?;
        // Newest insertions first so equal timestamps keep a stable order.
        let mut activities: Vec<Activity> = state
            .activities
            .iter()
            .rev()
            .filter(|activity| client_id.is_none_or(|id| activity.client_id.as_ref() == Some(id)))
            .cloned()
            .collect();
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        activities.truncate(limit);
        Ok(activities)
    }

    async fn create_activity(&self, activity: NewActivity) -> StoreResult<Activity> {
        activity.validate()?;
        let record = activity.into_activity(ActivityId::generate(), self.clock.utc());
        self.write()?.activities.push(record.clone());
        Ok(record)
    }
}
