// src/assertions.rs
//
// Email assertions over the opened conversation and the inbox counts.
// Each assertion opens the next unread conversation if none is open.

use regex::Regex;

use crate::client_ops::{Clock, HelpdeskClientOps};
use crate::conversation::Conversation;
use crate::error::Error;
use crate::helpscout::{or_fail, HelpScout};
use crate::reporter::Reporter;

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn check(holds: bool, message: impl FnOnce() -> String) -> Result<(), Error> {
    if holds {
        Ok(())
    } else {
        Err(Error::Assertion(message()))
    }
}

fn contains(field: &str, haystack: &str, needle: &str) -> Result<(), Error> {
    check(haystack.contains(needle), || {
        format!("Email {} does not contain `{}` (was `{}`)", field, needle, haystack)
    })
}

fn not_contains(field: &str, haystack: &str, needle: &str) -> Result<(), Error> {
    check(!haystack.contains(needle), || {
        format!("Email {} unexpectedly contains `{}` (was `{}`)", field, needle, haystack)
    })
}

fn matches(field: &str, haystack: &str, pattern: &str) -> Result<(), Error> {
    let re = compile(pattern)?;
    check(re.is_match(haystack), || {
        format!("Email {} does not match /{}/ (was `{}`)", field, pattern, haystack)
    })
}

impl<C: HelpdeskClientOps, K: Clock, R: Reporter> HelpScout<C, K, R> {
    fn assert_opened<F>(&mut self, assertion: F)
    where
        F: FnOnce(&Conversation) -> Result<(), Error>,
    {
        let result = self.inbox.get_opened_email(false).and_then(assertion);
        or_fail(&self.reporter, result)
    }

    fn count(&self, actual: usize, expected: usize, what: &str) {
        or_fail(
            &self.reporter,
            check(actual == expected, || {
                format!("Expected {} {}, found {}", expected, what, actual)
            }),
        )
    }

    // ===== Subject =====

    pub fn see_in_opened_email_subject(&mut self, expected: &str) {
        self.assert_opened(|c| contains("subject", c.subject(), expected))
    }

    pub fn dont_see_in_opened_email_subject(&mut self, unexpected: &str) {
        self.assert_opened(|c| not_contains("subject", c.subject(), unexpected))
    }

    pub fn see_in_opened_email_subject_matches(&mut self, pattern: &str) {
        self.assert_opened(|c| matches("subject", c.subject(), pattern))
    }

    // ===== Body =====

    pub fn see_in_opened_email_body(&mut self, expected: &str) {
        self.assert_opened(|c| contains("body", c.body(), expected))
    }

    pub fn dont_see_in_opened_email_body(&mut self, unexpected: &str) {
        self.assert_opened(|c| not_contains("body", c.body(), unexpected))
    }

    pub fn see_in_opened_email_body_matches(&mut self, pattern: &str) {
        self.assert_opened(|c| matches("body", c.body(), pattern))
    }

    /// Every match of `pattern` in the opened body. With capture groups,
    /// each entry is the whole match followed by the groups.
    pub fn grab_matches_from_opened_email_body(&mut self, pattern: &str) -> Vec<String> {
        let result = compile(pattern).and_then(|re| {
            let body = self.inbox.get_opened_email(false)?.body();
            Ok(re
                .captures_iter(body)
                .flat_map(|caps| {
                    caps.iter()
                        .flatten()
                        .map(|m| m.as_str().to_string())
                        .collect::<Vec<_>>()
                })
                .collect())
        });
        or_fail(&self.reporter, result)
    }

    // ===== Sender and recipients =====

    pub fn see_in_opened_email_sender(&mut self, expected: &str) {
        self.assert_opened(|c| contains("sender", c.sender(), expected))
    }

    pub fn dont_see_in_opened_email_sender(&mut self, unexpected: &str) {
        self.assert_opened(|c| not_contains("sender", c.sender(), unexpected))
    }

    pub fn see_in_opened_email_to_field(&mut self, expected: &str) {
        self.assert_opened(|c| contains("To field", c.to(), expected))
    }

    pub fn see_in_opened_email_cc_field(&mut self, expected: &str) {
        self.assert_opened(|c| contains("CC field", &c.cc(), expected))
    }

    pub fn see_in_opened_email_bcc_field(&mut self, expected: &str) {
        self.assert_opened(|c| contains("BCC field", &c.bcc(), expected))
    }

    pub fn see_in_opened_email_recipients(&mut self, expected: &str) {
        self.assert_opened(|c| contains("recipients", &c.recipients(), expected))
    }

    pub fn dont_see_in_opened_email_recipients(&mut self, unexpected: &str) {
        self.assert_opened(|c| not_contains("recipients", &c.recipients(), unexpected))
    }

    // ===== Counts =====

    pub fn have_emails(&self) {
        let total = self.inbox.current_inbox().len();
        or_fail(&self.reporter, check(total > 0, || "Inbox is empty".to_string()))
    }

    pub fn dont_have_emails(&self) {
        self.count(self.inbox.current_inbox().len(), 0, "emails")
    }

    pub fn have_number_of_emails(&self, expected: usize) {
        self.count(self.inbox.current_inbox().len(), expected, "emails")
    }

    pub fn have_unread_emails(&self) {
        let unread = self.inbox.unread_inbox().len();
        or_fail(&self.reporter, check(unread > 0, || Error::EmptyInbox.to_string()))
    }

    pub fn dont_have_unread_emails(&self) {
        self.count(self.inbox.unread_inbox().len(), 0, "unread emails")
    }

    pub fn have_number_of_unread_emails(&self, expected: usize) {
        self.count(self.inbox.unread_inbox().len(), expected, "unread emails")
    }
}
