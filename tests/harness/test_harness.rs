// tests/harness/test_harness.rs
//
// High-level test harness combining all components.
// Provides a convenient API for writing integration tests.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use helpscout_inbox::{Clock, Conversation, HelpScout, MailboxId, PanicReporter, PollSettings};

use crate::harness::fixtures::FixtureLoader;
use crate::harness::mock_client::{MockHelpdeskClient, RecordedAction};
use crate::harness::virtual_clock::VirtualClock;
use crate::harness::virtual_helpdesk::{HelpdeskEntry, VirtualHelpdesk};

pub const MAILBOX: MailboxId = 42;
pub const MAILBOX_EMAIL: &str = "support@example.com";

pub type TestModule = HelpScout<MockHelpdeskClient, VirtualClock, PanicReporter>;

pub struct TestHarness {
    pub helpdesk: Arc<RwLock<VirtualHelpdesk>>,
    pub clock: VirtualClock,
    pub module: TestModule,
    loader: FixtureLoader,
}

impl TestHarness {
    /// Harness with the default 250ms / 5s poll settings.
    pub fn new() -> Self {
        Self::with_poll(PollSettings::default())
    }

    pub fn with_poll(poll: PollSettings) -> Self {
        let mut helpdesk = VirtualHelpdesk::new();
        helpdesk.add_mailbox(MAILBOX, MAILBOX_EMAIL);
        let helpdesk = Arc::new(RwLock::new(helpdesk));

        let clock = VirtualClock::at(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap());
        let client = MockHelpdeskClient::new(Arc::clone(&helpdesk), clock.clone());
        let module = HelpScout::new(client, clock.clone(), PanicReporter, MAILBOX, poll);

        Self {
            helpdesk,
            clock,
            module,
            loader: FixtureLoader::new(),
        }
    }

    // ===== Conversation Management =====

    /// Conversation created `created` seconds after the epoch.
    pub fn conversation(id: u64, created: i64, sender: &str) -> Conversation {
        Conversation::new(
            id,
            &format!("Conversation {}", id),
            sender,
            Utc.timestamp_opt(created, 0).unwrap(),
        )
        .with_body(&format!("Body of {}", id))
    }

    pub fn add(&self, conversation: Conversation) -> u64 {
        self.add_entry(HelpdeskEntry::new(conversation, MAILBOX))
    }

    pub fn add_entry(&self, entry: HelpdeskEntry) -> u64 {
        self.helpdesk.write().unwrap().add(entry)
    }

    /// Add a conversation that only shows up in listings after `delay`.
    pub fn add_arriving_after(&self, conversation: Conversation, delay: Duration) -> u64 {
        let at = self.now() + chrono::Duration::from_std(delay).unwrap();
        self.add_entry(HelpdeskEntry::new(conversation, MAILBOX).arriving_at(at))
    }

    /// Load every conversation of a fixture page into the default mailbox.
    pub fn add_fixture_page(&self, name: &str) -> Vec<u64> {
        self.loader
            .load_page(name)
            .into_iter()
            .map(|c| self.add(c))
            .collect()
    }

    // ===== Time =====

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ===== Inspection =====

    pub fn actions(&self) -> Vec<RecordedAction> {
        self.module.client().get_recorded_actions()
    }

    pub fn list_count(&self) -> usize {
        self.module.client().list_count()
    }

    pub fn current_ids(&self) -> Vec<u64> {
        self.module.current_inbox().iter().map(|c| c.id).collect()
    }

    pub fn unread_ids(&self) -> Vec<u64> {
        self.module.inbox().unread_inbox().iter().map(|c| c.id).collect()
    }

    // ===== Assertion Helpers =====

    pub fn assert_deleted(&self, id: u64) {
        let deleted = self.module.client().deleted_ids();
        assert!(
            deleted.contains(&id),
            "Expected conversation {} to be deleted, but deletes were: {:?}",
            id,
            deleted
        );
        assert!(
            !self.helpdesk.read().unwrap().contains(id),
            "Conversation {} is still stored in the helpdesk",
            id
        );
    }

    pub fn assert_inbox(&self, expected: &[u64]) {
        assert_eq!(
            self.current_ids(),
            expected,
            "current inbox mismatch"
        );
    }
}
