// src/cli.rs

use clap::{Parser, Subcommand};
use secure_string::SecureString;
use std::path::PathBuf;

/// Command-line interface options for helpscout-inbox.
#[derive(Parser, Debug)]
#[command(
    name = "helpscout-inbox",
    version,
    about = "Inspect and wait on a Help Scout mailbox",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Help Scout app id
    #[arg(short = 'I', long, env = "HELPSCOUT_APP_ID")]
    pub app_id: Option<String>,

    /// Help Scout app secret
    #[arg(short = 'S', long, env = "HELPSCOUT_APP_SECRET", hide_env_values = true)]
    pub app_secret: Option<SecureString>,

    /// Default mailbox id
    #[arg(short = 'M', long, env = "HELPSCOUT_MAILBOX_ID")]
    pub mailbox_id: Option<u64>,

    #[arg(short, long, help = "turn on debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List open, unassigned conversations, newest first
    Fetch {
        /// Mailbox to read instead of the configured one
        #[arg(short, long)]
        mailbox: Option<u64>,

        /// Print conversations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Block until a conversation from SENDER shows up
    Wait {
        #[arg(short, long)]
        sender: String,

        /// Seconds to wait before giving up
        #[arg(short, long)]
        timeout: Option<u64>,

        #[arg(short, long)]
        mailbox: Option<u64>,
    },

    /// Delete a conversation by id
    Delete { id: u64 },
}
