// tests/harness/mock_client.rs
//
// Mock helpdesk client for testing.
// Records all calls for verification and operates against a VirtualHelpdesk.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use helpscout_inbox::cfg::filter::{ConversationFilter, ConversationRequest, UNASSIGNED_QUERY};
use helpscout_inbox::{Clock, Conversation, ConversationId, Error, HelpdeskClientOps};

use crate::harness::virtual_clock::VirtualClock;
use crate::harness::virtual_helpdesk::VirtualHelpdesk;

/// Recorded call types for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedAction {
    /// Conversations were listed
    List { filter: ConversationFilter, request: ConversationRequest },
    /// A conversation was deleted
    Delete { id: ConversationId },
}

/// Mock helpdesk client.
/// Answers from a shared VirtualHelpdesk as of the virtual clock's time.
pub struct MockHelpdeskClient {
    helpdesk: Arc<RwLock<VirtualHelpdesk>>,
    actions: Arc<RwLock<Vec<RecordedAction>>>,
    failures: Arc<RwLock<VecDeque<Error>>>,
    clock: VirtualClock,
}

impl MockHelpdeskClient {
    pub fn new(helpdesk: Arc<RwLock<VirtualHelpdesk>>, clock: VirtualClock) -> Self {
        Self {
            helpdesk,
            actions: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(VecDeque::new())),
            clock,
        }
    }

    /// Make the next call fail with `error`. Queued failures are used in order.
    pub fn fail_next(&self, error: Error) {
        self.failures.write().unwrap().push_back(error);
    }

    fn take_failure(&self) -> Option<Error> {
        self.failures.write().unwrap().pop_front()
    }

    fn record_action(&self, action: RecordedAction) {
        self.actions.write().unwrap().push(action);
    }

    // ===== Action Recording =====

    pub fn get_recorded_actions(&self) -> Vec<RecordedAction> {
        self.actions.read().unwrap().clone()
    }

    pub fn list_count(&self) -> usize {
        self.actions
            .read()
            .unwrap()
            .iter()
            .filter(|a| matches!(a, RecordedAction::List { .. }))
            .count()
    }

    pub fn deleted_ids(&self) -> Vec<ConversationId> {
        self.actions
            .read()
            .unwrap()
            .iter()
            .filter_map(|a| match a {
                RecordedAction::Delete { id } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl HelpdeskClientOps for MockHelpdeskClient {
    fn list_conversations(
        &mut self,
        filter: &ConversationFilter,
        request: &ConversationRequest,
    ) -> Result<Vec<Conversation>, Error> {
        self.record_action(RecordedAction::List {
            filter: filter.clone(),
            request: *request,
        });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mailbox = filter
            .mailbox
            .ok_or_else(|| Error::Api { status: 400, message: "mailbox is required".into() })?;
        if filter.query.as_deref() != Some(UNASSIGNED_QUERY) {
            return Err(Error::Api { status: 400, message: "unsupported query".into() });
        }

        let now = self.clock.now();
        Ok(self.helpdesk.read().unwrap().list_unassigned_open(mailbox, now))
    }

    fn delete_conversation(&mut self, id: ConversationId) -> Result<(), Error> {
        self.record_action(RecordedAction::Delete { id });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        if self.helpdesk.write().unwrap().delete(id) {
            Ok(())
        } else {
            Err(Error::Api { status: 404, message: format!("conversation {} not found", id) })
        }
    }
}
