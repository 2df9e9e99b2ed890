// src/lib.rs
//
// Library entry point for helpscout-inbox.
// Inspect a Help Scout mailbox from end-to-end tests: fetch unassigned
// conversations, walk them as an unread inbox, assert on the opened one,
// delete it, or wait for mail from a given sender.

pub mod api;
pub mod assertions;
pub mod cfg;
pub mod client_ops;
pub mod conversation;
pub mod error;
pub mod helpscout;
pub mod inbox;
pub mod oauth2;
pub mod poller;
pub mod reporter;

pub use api::HelpScoutClient;
pub use client_ops::{Clock, HelpdeskClientOps, RealClock};
pub use conversation::{Conversation, ConversationId, MailboxId};
pub use error::Error;
pub use helpscout::HelpScout;
pub use inbox::InboxQueue;
pub use poller::{PollOutcome, PollSettings, Poller};
pub use reporter::{PanicReporter, Reporter};
