//! Canned, data-driven answers to assistant queries.

use std::sync::Arc;

use minijinja::{Environment, Value, context};
use thiserror::Error;
use tracing::debug;

use super::Intent;
use crate::ids::UserId;
use crate::store::{
    StoreError,
    domain::{AssignmentFilter, AssignmentStatus, Client},
    ports::DashboardStore,
};

/// Number of activities quoted by the activity answer.
pub const RECENT_ACTIVITY_COUNT: usize = 3;

const TEMPLATES: &[(&str, &str)] = &[
    (
        "roi",
        "Based on your current data, your average ROI is {{ avg_roi }}. \
         This represents strong performance across your {{ active_clients }} active clients.",
    ),
    (
        "activity",
        "Recent activity includes: {{ titles | join(', ') }}. \
         All clients are showing positive engagement.",
    ),
    (
        "clients",
        "You currently have {{ active_clients }} active clients. \
         Your top performer has an ROI of {{ top_roi }}%.",
    ),
    (
        "tests",
        "You have {{ completed }} completed tests and {{ in_progress }} tests currently \
         in progress. Overall completion rate is strong.",
    ),
    (
        "help",
        "I can help you analyze your client data, ROI metrics, test results, and recent \
         activities. What specific information would you like to know?",
    ),
];

/// Errors raised while answering a query.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Reading live data failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A response template failed to load or render.
    #[error("assistant template '{name}' failed: {reason}")]
    Template {
        /// Template name.
        name: &'static str,
        /// Renderer message.
        reason: String,
    },
}

/// Maps free-text queries to templated answers over live metrics.
///
/// Answers are deterministic: the same query over the same data yields the
/// same text.
pub struct QueryResponder {
    store: Arc<dyn DashboardStore>,
    manager_id: UserId,
    templates: Environment<'static>,
}

impl std::fmt::Debug for QueryResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryResponder")
            .field("manager_id", &self.manager_id)
            .finish_non_exhaustive()
    }
}

impl QueryResponder {
    /// Creates a responder that reports on clients of `manager_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Template`] if a response template does not
    /// compile.
    pub fn new(store: Arc<dyn DashboardStore>, manager_id: UserId) -> Result<Self, AssistantError> {
        let mut templates = Environment::new();
        for &(name, source) in TEMPLATES {
            templates
                .add_template(name, source)
                .map_err(|error| AssistantError::Template {
                    name,
                    reason: error.to_string(),
                })?;
        }
        Ok(Self {
            store,
            manager_id,
            templates,
        })
    }

    /// Answers a free-text query.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Store`] when live data cannot be read.
    pub async fn respond(&self, query: &str) -> Result<String, AssistantError> {
        let intent = Intent::classify(query);
        debug!(intent = intent.name(), "answering assistant query");
        let values = self.gather(intent).await?;
        self.render(intent, values)
    }

    async fn gather(&self, intent: Intent) -> Result<Value, AssistantError> {
        let values = match intent {
            Intent::Roi => {
                let metrics = self.store.dashboard_metrics(&self.manager_id).await?;
                context! {
                    avg_roi => metrics.avg_roi,
                    active_clients => metrics.active_clients,
                }
            }
            Intent::Activity => {
                let activities = self
                    .store
                    .list_activities(None, RECENT_ACTIVITY_COUNT)
                    .await?;
                let titles: Vec<String> = activities.into_iter().map(|a| a.title).collect();
                context! { titles => titles }
            }
            Intent::Clients => {
                let clients = self.store.list_clients(Some(&self.manager_id)).await?;
                let active = clients.iter().filter(|client| client.is_active()).count();
                context! {
                    active_clients => active,
                    top_roi => top_roi(&clients),
                }
            }
            Intent::Tests => {
                let assignments = self
                    .store
                    .list_test_assignments(&AssignmentFilter::default())
                    .await?;
                let count = |status| assignments.iter().filter(|a| a.status == status).count();
                context! {
                    completed => count(AssignmentStatus::Completed),
                    in_progress => count(AssignmentStatus::InProgress),
                }
            }
            Intent::Help => context! {},
        };
        Ok(values)
    }

    fn render(&self, intent: Intent, values: Value) -> Result<String, AssistantError> {
        let name = intent.name();
        self.templates
            .get_template(name)
            .and_then(|template| template.render(values))
            .map_err(|error| AssistantError::Template {
                name,
                reason: error.to_string(),
            })
    }
}

/// Highest parsed ROI, formatted without a trailing `.0`. Missing or
/// unparseable values count as zero; no clients yields `0`.
fn top_roi(clients: &[Client]) -> String {
    clients
        .iter()
        .map(Client::roi_value)
        .reduce(f64::max)
        .unwrap_or_default()
        .to_string()
}
