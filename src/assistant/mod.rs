//! Data assistant: keyword intent matching over live dashboard data.
//!
//! Queries are classified by [`Intent::classify`] against a fixed,
//! priority-ordered keyword table and answered by [`QueryResponder`] from
//! storage reads. This is deliberately keyword matching, not language
//! understanding.

mod intent;
mod responder;

pub use intent::{INTENT_KEYWORDS, Intent};
pub use responder::{AssistantError, QueryResponder, RECENT_ACTIVITY_COUNT};

#[cfg(test)]
mod tests;
