//! waweb entry point.

mod cli;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waweb_client::{Client, ClientConfig};
use waweb_page::CdpPage;

use crate::cli::{Cli, Commands};

const APP_URL: &str = "https://web.whatsapp.com";

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let Some(path) = &cli.config else {
        return Ok(ClientConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let page = CdpPage::attach(&cli.endpoint, APP_URL)
        .await
        .with_context(|| format!("attaching to a WhatsApp Web tab via {}", cli.endpoint))?;
    let client = Client::new(page, config);

    client
        .wait_until_ready()
        .await
        .context("waiting for the application shell")?;

    match cli.command {
        Commands::Send {
            contact,
            message,
            phone,
        } => {
            if phone {
                client.open_by_phone(&contact).await?;
                client.send_to_open_conversation(&message).await?;
                info!("Message sent to phone {}", contact);
            } else if client.send_message(&contact, &message).await? {
                info!("Message sent to '{}'", contact);
            } else {
                warn!("Could not open a conversation for '{}'", contact);
                std::process::exit(1);
            }
        }

        Commands::History {
            contact,
            limit,
            full,
        } => {
            let messages = if full {
                client.extract_full_history(&contact, limit).await?
            } else {
                client.extract_history(&contact, limit).await?
            };
            println!("{}", serde_json::to_string_pretty(&messages)?);
        }

        Commands::List { all } => {
            if all {
                client.load_all_conversations().await?;
            }
            let summaries = client.list_conversations().await?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }

        Commands::Resolve { query } => {
            let name = client.resolve_contact(&query).await?;
            println!("{name}");
        }

        Commands::Watch => {
            let mut watch = client.watch();
            info!("Watching the sidebar; Ctrl-C to stop");
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        watch.cancel();
                        break;
                    }
                    change = watch.changed() => {
                        match change {
                            Some(summary) => println!("{}", serde_json::to_string(&summary)?),
                            None => break,
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
