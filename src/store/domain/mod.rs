//! Record types owned by the storage port.
//!
//! The core reads and writes these records only through
//! [`crate::store::ports::DashboardStore`]. Beyond validation of inbound
//! payloads, the only fields it interprets are ownership (`clientId`),
//! status, and the numeric ROI.

mod assessment;
mod client;
mod conversation;
mod engagement;
mod validation;

pub use assessment::{
    AssignmentFilter, AssignmentStatus, MAX_SCORE, NewTest, NewTestAssignment, Test,
    TestAssignment, TestAssignmentPatch,
};
pub use client::{Client, ClientStatus, NewClient};
pub use conversation::{
    Conversation, ConversationFilter, Message, MessageKind, NewConversation, NewMessage,
    SenderType,
};
pub use engagement::{Activity, DashboardMetrics, NewActivity, NewRoiMetric, RoiMetric};
pub use validation::{
    RecordValidationError, ValidationResult, parse_decimal, require_decimal, require_text,
};
