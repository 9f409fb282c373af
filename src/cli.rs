//! CLI definitions for waweb.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// waweb CLI.
#[derive(Parser)]
#[command(name = "waweb")]
#[command(about = "WhatsApp Web automation client over the Chrome DevTools Protocol")]
#[command(version)]
pub(crate) struct Cli {
    /// DevTools HTTP endpoint of a running browser
    #[arg(
        long,
        default_value = "http://127.0.0.1:9222",
        global = true,
        env = "WAWEB_ENDPOINT"
    )]
    pub endpoint: String,

    /// Configuration file path (TOML); defaults are used when absent
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Send a message to a contact
    Send {
        /// Contact name as shown in the sidebar
        contact: String,

        /// Message text
        message: String,

        /// Treat CONTACT as a phone number and open the chat by URL
        #[arg(long)]
        phone: bool,
    },

    /// Print the most recent messages of a conversation
    History {
        /// Contact name as shown in the sidebar
        contact: String,

        /// Number of messages to keep, newest last
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Scroll back to load older messages before extracting
        #[arg(long)]
        full: bool,
    },

    /// List sidebar conversations in display order
    List {
        /// Scroll the sidebar to load every entry first
        #[arg(long)]
        all: bool,
    },

    /// Resolve a free-text query to exactly one contact name
    Resolve {
        /// Search query
        query: String,
    },

    /// Watch the sidebar and print every change to the topmost conversation
    Watch,
}
