//! Assessments (tests) and their assignment to clients.

use super::validation::{RecordValidationError, ValidationResult, require_text};
use crate::ids::{AssignmentId, ClientId, TestId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest score an assignment may record.
pub const MAX_SCORE: u32 = 100;

/// An assessment definition authored by a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    /// Unique test identifier.
    pub id: TestId,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// The authoring manager.
    pub created_by: UserId,
    /// When the test was created.
    pub created_at: DateTime<Utc>,
}

/// Inbound payload for creating a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTest {
    /// Short title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// The authoring manager.
    pub created_by: UserId,
}

impl NewTest {
    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordValidationError`] for a blank title or author.
    pub fn validate(&self) -> ValidationResult {
        require_text("title", &self.title)?;
        require_text("createdBy", self.created_by.as_str())
    }

    /// Materialises the payload into a stored record.
    #[must_use]
    pub fn into_test(self, id: TestId, created_at: DateTime<Utc>) -> Test {
        Test {
            id,
            title: self.title,
            description: self.description,
            created_by: self.created_by,
            created_at,
        }
    }
}

/// Progress of an assigned test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Assigned but not started.
    #[default]
    Pending,
    /// Started by the client.
    InProgress,
    /// Finished.
    Completed,
}

impl AssignmentStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A test assigned to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAssignment {
    /// Unique assignment identifier.
    pub id: AssignmentId,
    /// The assigned test.
    pub test_id: TestId,
    /// The client taking the test.
    pub client_id: ClientId,
    /// Current progress.
    pub status: AssignmentStatus,
    /// Score out of [`MAX_SCORE`], once graded.
    pub score: Option<u32>,
    /// When the test was assigned.
    pub assigned_at: DateTime<Utc>,
    /// When the test was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl TestAssignment {
    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: TestAssignmentPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(score) = patch.score {
            self.score = Some(score);
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = Some(completed_at);
        }
    }
}

/// Inbound payload for assigning a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestAssignment {
    /// The assigned test.
    pub test_id: TestId,
    /// The client taking the test.
    pub client_id: ClientId,
    /// Initial progress; defaults to pending.
    #[serde(default)]
    pub status: AssignmentStatus,
}

impl NewTestAssignment {
    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordValidationError`] for a blank test or client id.
    pub fn validate(&self) -> ValidationResult {
        require_text("testId", self.test_id.as_str())?;
        require_text("clientId", self.client_id.as_str())
    }

    /// Materialises the payload into a stored record.
    #[must_use]
    pub fn into_assignment(self, id: AssignmentId, assigned_at: DateTime<Utc>) -> TestAssignment {
        TestAssignment {
            id,
            test_id: self.test_id,
            client_id: self.client_id,
            status: self.status,
            score: None,
            assigned_at,
            completed_at: None,
        }
    }
}

/// Partial update for an assignment; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAssignmentPatch {
    /// New progress.
    #[serde(default)]
    pub status: Option<AssignmentStatus>,
    /// New score.
    #[serde(default)]
    pub score: Option<u32>,
    /// Completion time.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TestAssignmentPatch {
    /// Checks the score range.
    ///
    /// # Errors
    ///
    /// Returns [`RecordValidationError::OutOfRange`] when the score exceeds
    /// [`MAX_SCORE`].
    pub fn validate(&self) -> ValidationResult {
        match self.score {
            Some(score) if score > MAX_SCORE => Err(RecordValidationError::OutOfRange {
                field: "score",
                reason: format!("must be at most {MAX_SCORE}, got {score}"),
            }),
            _ => Ok(()),
        }
    }
}

/// Filter for assignment listings; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    /// Restrict to one client.
    pub client_id: Option<ClientId>,
    /// Restrict to one test.
    pub test_id: Option<TestId>,
}

impl AssignmentFilter {
    /// Returns `true` when the assignment satisfies every set field.
    #[must_use]
    pub fn matches(&self, assignment: &TestAssignment) -> bool {
        self.client_id
            .as_ref()
            .is_none_or(|id| *id == assignment.client_id)
            && self
                .test_id
                .as_ref()
                .is_none_or(|id| *id == assignment.test_id)
    }
}
