// src/helpscout.rs
//
// Host-facing inbox module: fetch, open, delete and wait on Help Scout
// conversations from inside a test.

use log::{debug, error, info};
use std::time::Duration;

use crate::api::HelpScoutClient;
use crate::cfg::config::Settings;
use crate::cfg::filter::{ConversationFilter, ConversationRequest};
use crate::client_ops::{Clock, HelpdeskClientOps, RealClock};
use crate::conversation::{Conversation, ConversationId, MailboxId};
use crate::error::Error;
use crate::inbox::{sort_newest_first, InboxQueue};
use crate::oauth2::OAuth2Credentials;
use crate::poller::{PollSettings, Poller};
use crate::reporter::{PanicReporter, Reporter};

/// Unwrap `result` or hand the failure to `reporter`.
pub(crate) fn or_fail<T, R: Reporter>(reporter: &R, result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => reporter.fail(&err.to_string()),
    }
}

/// The inbox module. `try_*` methods return errors; the others report
/// them through the [`Reporter`] as hard failures.
pub struct HelpScout<C: HelpdeskClientOps, K: Clock = RealClock, R: Reporter = PanicReporter> {
    pub(crate) client: C,
    pub(crate) clock: K,
    pub(crate) reporter: R,
    pub(crate) inbox: InboxQueue,
    mailbox_id: MailboxId,
    poll: PollSettings,
}

impl HelpScout<HelpScoutClient> {
    /// Build the module against the real Help Scout API.
    pub fn initialize(settings: &Settings) -> Self {
        debug!(
            "Initializing HelpScout module for mailbox {} at {}",
            settings.mailbox_id, settings.api_url
        );
        let credentials = OAuth2Credentials::new(&settings.app_id, settings.app_secret.clone());
        let client = HelpScoutClient::builder(credentials)
            .api_url(settings.api_url.as_str())
            .timeout(settings.request_timeout)
            .max_pages(settings.max_pages)
            .build();

        HelpScout::new(client, RealClock, PanicReporter, settings.mailbox_id, settings.poll)
    }
}

impl<C: HelpdeskClientOps, K: Clock, R: Reporter> HelpScout<C, K, R> {
    pub fn new(client: C, clock: K, reporter: R, mailbox_id: MailboxId, poll: PollSettings) -> Self {
        HelpScout {
            client,
            clock,
            reporter,
            inbox: InboxQueue::new(),
            mailbox_id,
            poll,
        }
    }

    pub fn mailbox_id(&self) -> MailboxId {
        self.mailbox_id
    }

    pub fn poll_settings(&self) -> PollSettings {
        self.poll
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn inbox(&self) -> &InboxQueue {
        &self.inbox
    }

    pub fn current_inbox(&self) -> &[Conversation] {
        self.inbox.current_inbox()
    }

    /// Replace the inbox contents with `batch`, keeping its order.
    pub fn set_current_inbox(&mut self, batch: Vec<Conversation>) {
        self.inbox.set_current_inbox(batch);
    }

    // ===== Result-returning operations =====

    /// Fetch open, unassigned conversations, newest first.
    ///
    /// The inbox is reset either way: with the fetched batch on success,
    /// with nothing on failure.
    pub fn try_fetch_emails(&mut self, mailbox_id: Option<MailboxId>) -> Result<(), Error> {
        let mailbox_id = mailbox_id.unwrap_or(self.mailbox_id);
        let filter = ConversationFilter::unassigned_open(mailbox_id);
        let request = ConversationRequest::new().with_mailbox().with_threads();

        match self.client.list_conversations(&filter, &request) {
            Ok(mut batch) => {
                sort_newest_first(&mut batch);
                info!("Fetched {} conversations from mailbox {}", batch.len(), mailbox_id);
                self.inbox.set_current_inbox(batch);
                Ok(())
            }
            Err(err) => {
                error!("Fetching mailbox {} failed: {}", mailbox_id, err);
                self.inbox.set_current_inbox(Vec::new());
                Err(err)
            }
        }
    }

    pub fn try_open_next_unread_email(&mut self) -> Result<(), Error> {
        self.inbox.open_next_unread_email()
    }

    pub fn try_get_opened_email(&mut self, fetch_next_unread: bool) -> Result<&Conversation, Error> {
        self.inbox.get_opened_email(fetch_next_unread)
    }

    pub fn try_delete_conversation(&mut self, conversation: &Conversation) -> Result<(), Error> {
        info!("Deleting conversation {} ({})", conversation.id, conversation.subject);
        self.try_delete_conversation_by_id(conversation.id)
    }

    /// Delete by id alone, for callers that never fetched the conversation.
    pub fn try_delete_conversation_by_id(&mut self, id: ConversationId) -> Result<(), Error> {
        debug!("Deleting conversation {} from Help Scout", id);
        self.client.delete_conversation(id)
    }

    /// Re-fetch until a conversation from `email_address` is in the inbox.
    ///
    /// Every tick is a full fetch; only the fetched batch is scanned, not
    /// what is left unread.
    pub fn try_wait_for_email_from_sender(
        &mut self,
        mailbox_id: Option<MailboxId>,
        email_address: &str,
        timeout: Option<Duration>,
    ) -> Result<(), Error> {
        let settings = match timeout {
            Some(timeout) => self.poll.with_timeout(timeout),
            None => self.poll,
        };
        info!(
            "Waiting up to {:?} for an email from {}",
            settings.timeout, email_address
        );

        let poller = Poller::new(self.clock.clone(), settings);
        let outcome = poller.run(|| {
            self.try_fetch_emails(mailbox_id)?;
            Ok(self
                .inbox
                .current_inbox()
                .iter()
                .any(|c| c.sender() == email_address))
        })?;

        if outcome.is_satisfied() {
            Ok(())
        } else {
            Err(Error::Timeout {
                timeout: settings.timeout,
                sender: email_address.to_string(),
            })
        }
    }

    // ===== Host operations =====

    pub fn fetch_emails(&mut self, mailbox_id: Option<MailboxId>) {
        let result = self.try_fetch_emails(mailbox_id);
        or_fail(&self.reporter, result)
    }

    pub fn open_next_unread_email(&mut self) {
        or_fail(&self.reporter, self.inbox.open_next_unread_email())
    }

    /// The conversation under inspection, advancing first when asked to or
    /// when nothing has been opened.
    pub fn get_opened_email(&mut self, fetch_next_unread: bool) -> &Conversation {
        or_fail(&self.reporter, self.inbox.get_opened_email(fetch_next_unread))
    }

    /// Delete `conversation` from the helpdesk.
    pub fn dont_have_email_email(&mut self, conversation: &Conversation) {
        let result = self.try_delete_conversation(conversation);
        or_fail(&self.reporter, result)
    }

    pub fn wait_for_email_from_sender(
        &mut self,
        mailbox_id: Option<MailboxId>,
        email_address: &str,
        timeout: Option<Duration>,
    ) {
        let result = self.try_wait_for_email_from_sender(mailbox_id, email_address, timeout);
        or_fail(&self.reporter, result)
    }
}
