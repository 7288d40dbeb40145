//! Customer account records.

use super::validation::{ValidationResult, parse_decimal, require_decimal, require_text};
use crate::ids::{ClientId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a customer account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// The account is live and counted as an active client.
    #[default]
    Active,
    /// The account is still being set up.
    Onboarding,
    /// The account shows churn signals.
    AtRisk,
    /// The account is dormant.
    Inactive,
}

impl ClientStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Onboarding => "onboarding",
            Self::AtRisk => "at_risk",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer account managed by a customer-success manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier.
    pub id: ClientId,
    /// Display name of the account.
    pub name: String,
    /// Industry vertical, when known.
    pub industry: Option<String>,
    /// Account lifecycle status.
    pub status: ClientStatus,
    /// Return on investment as a decimal percentage string.
    pub roi: Option<String>,
    /// The manager responsible for the account.
    pub csm_id: Option<UserId>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Returns `true` when the account status is [`ClientStatus::Active`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    /// Returns the ROI as a number, treating absent or unparsable values as 0.
    #[must_use]
    pub fn roi_value(&self) -> f64 {
        self.roi.as_deref().and_then(parse_decimal).unwrap_or(0.0)
    }
}

/// Inbound payload for creating a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    /// Display name of the account.
    pub name: String,
    /// Industry vertical.
    #[serde(default)]
    pub industry: Option<String>,
    /// Initial status; defaults to active.
    #[serde(default)]
    pub status: ClientStatus,
    /// Initial ROI as a decimal percentage string.
    #[serde(default)]
    pub roi: Option<String>,
    /// The responsible manager.
    #[serde(default)]
    pub csm_id: Option<UserId>,
}

impl NewClient {
    /// Creates a payload with the required name and defaults elsewhere.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: None,
            status: ClientStatus::default(),
            roi: None,
            csm_id: None,
        }
    }

    /// Sets the ROI string.
    #[must_use]
    pub fn with_roi(mut self, roi: impl Into<String>) -> Self {
        self.roi = Some(roi.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: ClientStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the responsible manager.
    #[must_use]
    pub fn with_csm(mut self, csm_id: UserId) -> Self {
        self.csm_id = Some(csm_id);
        self
    }

    /// Checks required fields and the ROI format.
    ///
    /// # Errors
    ///
    /// Returns a [`super::RecordValidationError`] when the name is blank or
    /// the ROI is not a decimal.
    pub fn validate(&self) -> ValidationResult {
        require_text("name", &self.name)?;
        if let Some(roi) = &self.roi {
            require_decimal("roi", roi)?;
        }
        Ok(())
    }

    /// Materialises the payload into a stored record.
    #[must_use]
    pub fn into_client(self, id: ClientId, created_at: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name,
            industry: self.industry,
            status: self.status,
            roi: self.roi,
            csm_id: self.csm_id,
            created_at,
        }
    }
}
