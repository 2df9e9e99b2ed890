// src/api.rs
//
// Help Scout Mailbox API v2 client over blocking HTTP (ureq).

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::cfg::filter::{ConversationFilter, ConversationRequest};
use crate::client_ops::HelpdeskClientOps;
use crate::conversation::{Conversation, ConversationId, Mailbox, MailboxId};
use crate::error::Error;
use crate::oauth2::{AccessToken, OAuth2Credentials};

pub const DEFAULT_API_URL: &str = "https://api.helpscout.net/v2";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_PAGES: u32 = 5;

#[derive(Debug, Default, Deserialize)]
struct EmbeddedConversations {
    #[serde(default)]
    conversations: Vec<Conversation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    number: u32,
    total_pages: u32,
}

/// One HAL page of the conversation list.
#[derive(Debug, Deserialize)]
struct ConversationPage {
    #[serde(rename = "_embedded", default)]
    embedded: EmbeddedConversations,
    page: Option<PageInfo>,
}

pub struct HelpScoutClient {
    agent: ureq::Agent,
    api_url: String,
    credentials: OAuth2Credentials,
    token: Option<AccessToken>,
    mailboxes: HashMap<MailboxId, Mailbox>,
    max_pages: u32,
}

impl HelpScoutClient {
    pub fn new(credentials: OAuth2Credentials) -> Self {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: OAuth2Credentials) -> HelpScoutClientBuilder {
        HelpScoutClientBuilder {
            credentials,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn bearer(&mut self) -> Result<String, Error> {
        let now = chrono::Utc::now();
        match &self.token {
            Some(token) if token.is_fresh(now) => Ok(token.bearer()),
            _ => {
                let token = self
                    .credentials
                    .request_access_token(&self.agent, &self.url("oauth2/token"))?;
                let bearer = token.bearer();
                self.token = Some(token);
                Ok(bearer)
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&mut self, path: &str, query: &[(&str, String)]) -> Result<T, Error> {
        let bearer = self.bearer()?;
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let mut request = self.agent.get(&url).set("Authorization", &bearer);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = request.call()?;

        response
            .into_json()
            .map_err(|e| Error::Decode(format!("{}: {}", path, e)))
    }

    fn fetch_mailbox(&mut self, id: MailboxId) -> Result<Mailbox, Error> {
        if let Some(mailbox) = self.mailboxes.get(&id) {
            return Ok(mailbox.clone());
        }
        let mailbox: Mailbox = self.get_json(&format!("mailboxes/{}", id), &[])?;
        debug!("Resolved mailbox {} -> {}", id, mailbox.email);
        self.mailboxes.insert(id, mailbox.clone());
        Ok(mailbox)
    }
}

impl HelpdeskClientOps for HelpScoutClient {
    fn list_conversations(
        &mut self,
        filter: &ConversationFilter,
        request: &ConversationRequest,
    ) -> Result<Vec<Conversation>, Error> {
        let mut query = filter.query_pairs()?;
        if let Some(embed) = request.embed() {
            query.push(("embed", embed.to_string()));
        }

        let mut conversations = Vec::new();
        let mut page_number = 1;
        loop {
            let mut page_query = query.clone();
            page_query.push(("page", page_number.to_string()));
            let page: ConversationPage = self.get_json("conversations", &page_query)?;
            let count = page.embedded.conversations.len();
            conversations.extend(page.embedded.conversations);

            let total_pages = page.page.as_ref().map(|p| p.total_pages).unwrap_or(1);
            debug!(
                "Conversation page {}/{} returned {} conversations",
                page.page.as_ref().map(|p| p.number).unwrap_or(page_number),
                total_pages,
                count
            );
            if page_number >= total_pages {
                break;
            }
            if page_number >= self.max_pages {
                warn!(
                    "Stopping after {} of {} conversation pages",
                    page_number, total_pages
                );
                break;
            }
            page_number += 1;
        }

        if request.mailbox {
            for conversation in conversations.iter_mut() {
                let id = conversation.mailbox_id.or(filter.mailbox);
                if let Some(id) = id {
                    conversation.mailbox = Some(self.fetch_mailbox(id)?);
                }
            }
        }

        info!("Listed {} conversations", conversations.len());
        Ok(conversations)
    }

    fn delete_conversation(&mut self, id: ConversationId) -> Result<(), Error> {
        let bearer = self.bearer()?;
        let url = self.url(&format!("conversations/{}", id));
        debug!("DELETE {}", url);

        self.agent.delete(&url).set("Authorization", &bearer).call()?;
        info!("Deleted conversation {}", id);
        Ok(())
    }
}

pub struct HelpScoutClientBuilder {
    credentials: OAuth2Credentials,
    api_url: String,
    timeout: Duration,
    max_pages: u32,
}

impl HelpScoutClientBuilder {
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Timeout applied to every HTTP request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn build(self) -> HelpScoutClient {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        HelpScoutClient {
            agent,
            api_url: self.api_url,
            credentials: self.credentials,
            token: None,
            mailboxes: HashMap::new(),
            max_pages: self.max_pages,
        }
    }
}
