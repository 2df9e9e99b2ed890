use clap::Parser;
use env_logger::Builder;
use eyre::{eyre, Result};
use log::{debug, info, LevelFilter};
use std::time::Duration;

use helpscout_inbox::cfg::config::discover_config;
use helpscout_inbox::HelpScout;

mod cli;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = Builder::new();
    builder.parse_default_env();
    if cli.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.try_init().ok();

    let settings = discover_config(cli.config.as_deref())?
        .with_overrides(cli.app_id.clone(), cli.app_secret.clone(), cli.mailbox_id)
        .resolve()?;
    debug!("Resolved settings: {:?}", settings);

    let mut module = HelpScout::initialize(&settings);

    match cli.command {
        Command::Fetch { mailbox, json } => {
            module
                .try_fetch_emails(mailbox)
                .map_err(|e| eyre!("fetch failed: {}", e))?;
            let inbox = module.current_inbox();
            if json {
                println!("{}", serde_json::to_string_pretty(inbox)?);
            } else {
                for conversation in inbox {
                    println!(
                        "{}\t{}\t{}\t{}",
                        conversation.id,
                        conversation.created_at.to_rfc3339(),
                        conversation.sender(),
                        conversation.subject()
                    );
                }
                info!("{} conversations", inbox.len());
            }
        }
        Command::Wait {
            sender,
            timeout,
            mailbox,
        } => {
            module
                .try_wait_for_email_from_sender(mailbox, &sender, timeout.map(Duration::from_secs))
                .map_err(|e| eyre!("{}", e))?;
            println!("Email from {} arrived", sender);
        }
        Command::Delete { id } => {
            module
                .try_delete_conversation_by_id(id)
                .map_err(|e| eyre!("delete failed: {}", e))?;
            println!("Deleted conversation {}", id);
        }
    }

    Ok(())
}
