// src/cfg/config.rs

use eyre::{eyre, Result};
use log::{debug, error};
use secure_string::SecureString;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{DEFAULT_API_URL, DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT};
use crate::conversation::MailboxId;
use crate::poller::PollSettings;

pub const DEFAULT_CONFIG_FILE: &str = "helpscout-inbox.yml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(alias = "app-id")]
    pub app_id: Option<String>,

    #[serde(alias = "app-secret", default, deserialize_with = "deserialize_secret")]
    pub app_secret: Option<SecureString>,

    #[serde(alias = "mailbox-id")]
    pub mailbox_id: Option<MailboxId>,

    #[serde(alias = "api-url")]
    pub api_url: Option<String>,

    #[serde(alias = "poll-interval-ms")]
    pub poll_interval_ms: Option<u64>,

    #[serde(alias = "wait-timeout-secs")]
    pub wait_timeout_secs: Option<u64>,

    #[serde(alias = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,

    #[serde(alias = "max-pages")]
    pub max_pages: Option<u32>,
}

/// Everything the inbox module needs, with defaults applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_id: String,
    pub app_secret: SecureString,
    pub mailbox_id: MailboxId,
    pub api_url: String,
    pub poll: PollSettings,
    pub request_timeout: Duration,
    pub max_pages: u32,
}

impl Config {
    /// Overlay values given on the command line or in the environment.
    pub fn with_overrides(
        mut self,
        app_id: Option<String>,
        app_secret: Option<SecureString>,
        mailbox_id: Option<MailboxId>,
    ) -> Self {
        if app_id.is_some() {
            self.app_id = app_id;
        }
        if app_secret.is_some() {
            self.app_secret = app_secret;
        }
        if mailbox_id.is_some() {
            self.mailbox_id = mailbox_id;
        }
        self
    }

    pub fn resolve(self) -> Result<Settings> {
        let app_id = self.app_id.ok_or_else(|| eyre!("`app_id` is not configured"))?;
        let app_secret = self
            .app_secret
            .ok_or_else(|| eyre!("`app_secret` is not configured"))?;
        let mailbox_id = self
            .mailbox_id
            .ok_or_else(|| eyre!("`mailbox_id` is not configured"))?;

        let defaults = PollSettings::default();
        let poll = PollSettings {
            interval: self
                .poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            timeout: self
                .wait_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };
        if poll.interval.is_zero() {
            return Err(eyre!("`poll_interval_ms` must be greater than zero"));
        }

        Ok(Settings {
            app_id,
            app_secret,
            mailbox_id,
            api_url: self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            poll,
            request_timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            max_pages: self.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
        })
    }
}

pub fn load_config(config_path: &Path) -> Result<Config> {
    debug!("Loading configuration from {:?}", config_path);

    let content = fs::read_to_string(config_path).map_err(|e| {
        error!("Failed to read config file {}: {}", config_path.display(), e);
        eyre!("Failed to read config file {}: {}", config_path.display(), e)
    })?;

    let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
        error!("Failed to parse YAML: {}", e);
        eyre!("Failed to parse YAML: {}", e)
    })?;

    debug!("Successfully loaded configuration");
    Ok(cfg)
}

/// Load `explicit` if given (it must exist), otherwise the first default
/// location that exists, otherwise an empty config.
pub fn discover_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    for candidate in default_locations() {
        if candidate.is_file() {
            return load_config(&candidate);
        }
    }
    debug!("No config file found, relying on flags and environment");
    Ok(Config::default())
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("helpscout-inbox").join("config.yml"));
    }
    paths
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<Option<SecureString>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.map(SecureString::from))
}
