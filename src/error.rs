// src/error.rs
//
// Failure taxonomy for inbox, polling and Help Scout operations.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the inbox module and its helpdesk client.
#[derive(Error, Debug)]
pub enum Error {
    /// Help Scout answered with a non-success status.
    #[error("Help Scout API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("Help Scout request failed: {0}")]
    Transport(String),

    /// A response body could not be decoded.
    #[error("Failed to decode Help Scout response: {0}")]
    Decode(String),

    /// Access token could not be obtained.
    #[error("Help Scout authentication failed: {0}")]
    Auth(String),

    /// Consuming from an unread inbox with nothing left in it.
    #[error("Unread Inbox is Empty")]
    EmptyInbox,

    /// No conversation from `sender` showed up before the deadline.
    #[error("Timed out after {}s waiting for an email from {sender}", .timeout.as_secs_f64())]
    Timeout { timeout: Duration, sender: String },

    /// An assertion over the opened email or inbox did not hold.
    #[error("{0}")]
    Assertion(String),

    #[error("Invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for failures that originate in the helpdesk collaborator.
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            Error::Api { .. } | Error::Transport(_) | Error::Decode(_) | Error::Auth(_)
        )
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
                Error::Api { status, message }
            }
            ureq::Error::Transport(transport) => Error::Transport(transport.to_string()),
        }
    }
}
