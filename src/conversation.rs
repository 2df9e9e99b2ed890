// src/conversation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ConversationId = u64;
pub type MailboxId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mailbox {
    pub id: MailboxId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedThreads {
    #[serde(default)]
    pub threads: Vec<Thread>,
}

/// A Help Scout conversation as returned by `GET /v2/conversations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub mailbox_id: Option<MailboxId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub primary_customer: Option<Customer>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    #[serde(rename = "_embedded", default)]
    pub embedded: EmbeddedThreads,
    /// Filled in by the client when the mailbox was requested.
    #[serde(default, skip_deserializing)]
    pub mailbox: Option<Mailbox>,
}

impl Conversation {
    /// Minimal conversation, mostly useful for building test batches.
    pub fn new(id: ConversationId, subject: &str, sender: &str, created_at: DateTime<Utc>) -> Self {
        Conversation {
            id,
            number: None,
            subject: subject.to_string(),
            status: Some("active".to_string()),
            mailbox_id: None,
            created_at,
            primary_customer: Some(Customer {
                id: None,
                email: Some(sender.to_string()),
                first: None,
                last: None,
            }),
            cc: Vec::new(),
            bcc: Vec::new(),
            embedded: EmbeddedThreads::default(),
            mailbox: None,
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        let id = self.embedded.threads.len() as u64 + 1;
        self.embedded.threads.push(Thread {
            id,
            kind: Some("customer".to_string()),
            body: Some(body.to_string()),
        });
        self
    }

    pub fn with_mailbox(mut self, mailbox: Mailbox) -> Self {
        self.mailbox_id = Some(mailbox.id);
        self.mailbox = Some(mailbox);
        self
    }

    pub fn with_cc(mut self, cc: &[&str]) -> Self {
        self.cc = cc.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_bcc(mut self, bcc: &[&str]) -> Self {
        self.bcc = bcc.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn threads(&self) -> &[Thread] {
        &self.embedded.threads
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Text of the first thread, empty when threads were not embedded.
    pub fn body(&self) -> &str {
        self.threads()
            .first()
            .and_then(|t| t.body.as_deref())
            .unwrap_or_default()
    }

    /// The mailbox address the conversation was sent to.
    pub fn to(&self) -> &str {
        self.mailbox
            .as_ref()
            .map(|m| m.email.as_str())
            .unwrap_or_default()
    }

    pub fn cc(&self) -> String {
        self.cc.join(",")
    }

    pub fn bcc(&self) -> String {
        self.bcc.join(",")
    }

    /// First email address of the customer who opened the conversation.
    pub fn sender(&self) -> &str {
        self.primary_customer
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .unwrap_or_default()
    }

    /// To, CC and BCC addresses, comma-joined, skipping empty fields.
    pub fn recipients(&self) -> String {
        let mut all: Vec<&str> = Vec::new();
        if !self.to().is_empty() {
            all.push(self.to());
        }
        all.extend(self.cc.iter().map(String::as_str));
        all.extend(self.bcc.iter().map(String::as_str));
        all.join(",")
    }
}
