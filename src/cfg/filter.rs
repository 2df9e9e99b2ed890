// src/cfg/filter.rs

use serde::{Deserialize, Serialize};

use crate::conversation::MailboxId;
use crate::error::Error;

/// Query selecting conversations nobody has picked up yet.
pub const UNASSIGNED_QUERY: &str = "assigned:\"Unassigned\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Pending,
    Closed,
    Spam,
    Open,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAt,
    CustomerEmail,
    MailboxId,
    ModifiedAt,
    Number,
    Score,
    Status,
    Subject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter passed to the conversation list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationFilter {
    pub mailbox: Option<MailboxId>,
    pub status: Option<ConversationStatus>,
    pub query: Option<String>,
    pub sort_field: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl ConversationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open, unassigned conversations of `mailbox`, oldest first.
    pub fn unassigned_open(mailbox: MailboxId) -> Self {
        Self::new()
            .with_mailbox(mailbox)
            .with_status(ConversationStatus::Open)
            .with_query(UNASSIGNED_QUERY)
            .with_sort_field(SortField::CreatedAt)
            .with_sort_order(SortOrder::Asc)
    }

    pub fn with_mailbox(mut self, mailbox: MailboxId) -> Self {
        self.mailbox = Some(mailbox);
        self
    }

    pub fn with_status(mut self, status: ConversationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

    pub fn with_sort_field(mut self, field: SortField) -> Self {
        self.sort_field = Some(field);
        self
    }

    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Render the filter as URL query parameters.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>, Error> {
        let mut pairs = Vec::new();
        if let Some(mailbox) = self.mailbox {
            pairs.push(("mailbox", mailbox.to_string()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", plain(status)?));
        }
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(field) = &self.sort_field {
            pairs.push(("sortField", plain(field)?));
        }
        if let Some(order) = &self.sort_order {
            pairs.push(("sortOrder", plain(order)?));
        }
        Ok(pairs)
    }
}

fn plain<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_plain::to_string(value).map_err(|e| Error::Config(e.to_string()))
}

/// Which related resources to load alongside each conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationRequest {
    pub mailbox: bool,
    pub threads: bool,
}

impl ConversationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mailbox(mut self) -> Self {
        self.mailbox = true;
        self
    }

    pub fn with_threads(mut self) -> Self {
        self.threads = true;
        self
    }

    /// Value for the `embed` query parameter, if any.
    pub fn embed(&self) -> Option<&'static str> {
        self.threads.then_some("threads")
    }
}
