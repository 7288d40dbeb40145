//! Identifier newtypes providing type safety for every record kind.
//!
//! Identifiers are opaque strings: seeded records use readable keys such as
//! `c1` or `csm-1`, while records created at runtime receive a random UUID.
//! Wrapping them prevents accidental mixing of client, user, and
//! conversation identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing key.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Creates a new random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` when the identifier is empty or whitespace-only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Returns the inner string value.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of an authenticated user (manager or client-side).
    ///
    /// # Examples
    ///
    /// ```
    /// use pulseboard::ids::UserId;
    ///
    /// let id = UserId::new("csm-1");
    /// assert_eq!(id.as_str(), "csm-1");
    /// ```
    UserId
);

string_id!(
    /// Identifier of a customer account.
    ClientId
);

string_id!(
    /// Identifier of a conversation thread tied to one client.
    ConversationId
);

string_id!(
    /// Identifier of a single conversation message.
    MessageId
);

string_id!(
    /// Identifier of an assessment definition.
    TestId
);

string_id!(
    /// Identifier of an assessment assigned to a client.
    AssignmentId
);

string_id!(
    /// Identifier of a recorded ROI data point.
    RoiMetricId
);

string_id!(
    /// Identifier of an activity feed entry.
    ActivityId
);
