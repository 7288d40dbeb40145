//! ROI data points, activity feed entries, and dashboard aggregates.

use super::validation::{ValidationResult, require_decimal, require_text};
use crate::ids::{ActivityId, ClientId, RoiMetricId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded ROI measurement for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiMetric {
    /// Unique metric identifier.
    pub id: RoiMetricId,
    /// The measured client.
    pub client_id: ClientId,
    /// What was measured, e.g. `cost_savings`.
    pub metric_type: String,
    /// Measured value as a decimal string.
    pub value: String,
    /// Reporting period label, e.g. `2024-Q1`.
    pub period: String,
    /// When the measurement was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Inbound payload for recording an ROI measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoiMetric {
    /// The measured client.
    pub client_id: ClientId,
    /// What was measured.
    pub metric_type: String,
    /// Measured value as a decimal string.
    pub value: String,
    /// Reporting period label.
    pub period: String,
}

impl NewRoiMetric {
    /// Checks required fields and the value format.
    ///
    /// # Errors
    ///
    /// Returns a [`super::RecordValidationError`] for blank fields or a
    /// non-decimal value.
    pub fn validate(&self) -> ValidationResult {
        require_text("clientId", self.client_id.as_str())?;
        require_text("metricType", &self.metric_type)?;
        require_text("period", &self.period)?;
        require_decimal("value", &self.value)
    }

    /// Materialises the payload into a stored record.
    #[must_use]
    pub fn into_metric(self, id: RoiMetricId, recorded_at: DateTime<Utc>) -> RoiMetric {
        RoiMetric {
            id,
            client_id: self.client_id,
            metric_type: self.metric_type,
            value: self.value,
            period: self.period,
            recorded_at,
        }
    }
}

/// An entry in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique activity identifier.
    pub id: ActivityId,
    /// The client concerned, if any.
    pub client_id: Option<ClientId>,
    /// Kind of activity, e.g. `call` or `email`.
    pub activity_type: String,
    /// Short headline shown in the feed.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// When the activity happened.
    pub created_at: DateTime<Utc>,
}

/// Inbound payload for logging an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    /// The client concerned.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    /// Kind of activity.
    pub activity_type: String,
    /// Short headline.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewActivity {
    /// Creates a payload with the required fields.
    #[must_use]
    pub fn new(activity_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            client_id: None,
            activity_type: activity_type.into(),
            title: title.into(),
            description: None,
        }
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`super::RecordValidationError`] for a blank type or title.
    pub fn validate(&self) -> ValidationResult {
        require_text("activityType", &self.activity_type)?;
        require_text("title", &self.title)
    }

    /// Materialises the payload into a stored record.
    #[must_use]
    pub fn into_activity(self, id: ActivityId, created_at: DateTime<Utc>) -> Activity {
        Activity {
            id,
            client_id: self.client_id,
            activity_type: self.activity_type,
            title: self.title,
            description: self.description,
            created_at,
        }
    }
}

/// Headline numbers for a manager's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Number of active clients.
    pub active_clients: usize,
    /// Average ROI, pre-formatted with a `%` suffix.
    #[serde(rename = "avgROI")]
    pub avg_roi: String,
    /// Number of assessments in progress.
    pub active_tests: usize,
    /// Number of unread client messages.
    pub unread_messages: usize,
}
