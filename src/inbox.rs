// src/inbox.rs
//
// Consumption state of the most recently fetched batch of conversations.

use log::debug;
use std::collections::VecDeque;

use crate::conversation::Conversation;
use crate::error::Error;

/// The fetched batch, the part of it not yet opened, and the opened one.
///
/// `unread` is an owned copy of `current`: popping from it never touches
/// `current`, and it only ever shrinks from the front until the next
/// [`InboxQueue::set_current_inbox`].
#[derive(Debug, Default)]
pub struct InboxQueue {
    current: Vec<Conversation>,
    unread: VecDeque<Conversation>,
    opened: Option<Conversation>,
}

impl InboxQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all state with `batch`.
    pub fn set_current_inbox(&mut self, batch: Vec<Conversation>) {
        debug!("Setting current inbox to {} conversations", batch.len());
        self.unread = batch.iter().cloned().collect();
        self.current = batch;
        self.opened = None;
    }

    pub fn current_inbox(&self) -> &[Conversation] {
        &self.current
    }

    pub fn unread_inbox(&self) -> &VecDeque<Conversation> {
        &self.unread
    }

    pub fn opened_email(&self) -> Option<&Conversation> {
        self.opened.as_ref()
    }

    /// Pop the most recently created conversation not yet opened.
    pub fn get_most_recent_unread_email(&mut self) -> Result<Conversation, Error> {
        let conversation = self.unread.pop_front().ok_or(Error::EmptyInbox)?;
        debug!(
            "Popped conversation {} ({} unread left)",
            conversation.id,
            self.unread.len()
        );
        Ok(conversation)
    }

    pub fn open_next_unread_email(&mut self) -> Result<(), Error> {
        let conversation = self.get_most_recent_unread_email()?;
        self.opened = Some(conversation);
        Ok(())
    }

    /// The opened conversation, opening the next unread one first when
    /// `force_next` is set or nothing is open yet.
    pub fn get_opened_email(&mut self, force_next: bool) -> Result<&Conversation, Error> {
        if force_next || self.opened.is_none() {
            self.open_next_unread_email()?;
        }
        self.opened.as_ref().ok_or(Error::EmptyInbox)
    }
}

/// Order `batch` newest first. The sort is stable, so conversations created
/// at the same instant keep the order the helpdesk returned them in.
pub fn sort_newest_first(batch: &mut [Conversation]) {
    batch.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
