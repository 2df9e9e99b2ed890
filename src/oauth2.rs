// src/oauth2.rs

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use secure_string::SecureString;
use serde::Deserialize;

use crate::error::Error;

/// Tokens are refreshed this long before Help Scout says they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Help Scout app credentials (client-credentials grant).
#[derive(Debug, Clone)]
pub struct OAuth2Credentials {
    pub app_id: String,
    pub app_secret: SecureString,
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: SecureString,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value.unsecure())
    }
}

impl OAuth2Credentials {
    pub fn new(app_id: &str, app_secret: SecureString) -> Self {
        Self {
            app_id: app_id.to_string(),
            app_secret,
        }
    }

    /// Exchange the app id and secret for an access token.
    pub fn request_access_token(&self, agent: &ureq::Agent, token_url: &str) -> Result<AccessToken, Error> {
        info!("Requesting Help Scout access token");

        let response = agent
            .post(token_url)
            .send_form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_secret.unsecure()),
            ])
            .map_err(|e| match Error::from(e) {
                Error::Api { status, message } => {
                    Error::Auth(format!("token endpoint returned {}: {}", status, message))
                }
                other => other,
            })?;

        let token: TokenResponse = response
            .into_json()
            .map_err(|e| Error::Decode(format!("token response: {}", e)))?;

        debug!(
            "Got {} access token (expires in {} seconds)",
            token.token_type.as_deref().unwrap_or("bearer"),
            token.expires_in
        );

        Ok(AccessToken {
            value: SecureString::from(token.access_token),
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}
