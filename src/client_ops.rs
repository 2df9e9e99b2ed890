// src/client_ops.rs
//
// Trait abstraction for helpdesk client operations and time.
// Allows the inbox module to run against Help Scout or test mocks.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::cfg::filter::{ConversationFilter, ConversationRequest};
use crate::conversation::{Conversation, ConversationId};
use crate::error::Error;

/// Trait for helpdesk client operations.
/// Implemented by:
/// - `HelpScoutClient` (production)
/// - mock clients (testing)
pub trait HelpdeskClientOps {
    /// List conversations matching `filter`, loading what `request` asks for.
    fn list_conversations(
        &mut self,
        filter: &ConversationFilter,
        request: &ConversationRequest,
    ) -> Result<Vec<Conversation>, Error>;

    /// Permanently delete a conversation.
    fn delete_conversation(&mut self, id: ConversationId) -> Result<(), Error>;
}

/// Trait for time providers.
/// Allows production code to use real time or virtual time for testing.
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Real clock implementation using system time.
#[derive(Clone, Default)]
pub struct RealClock;

impl Clock for RealClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
