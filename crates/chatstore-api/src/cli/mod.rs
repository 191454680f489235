//! CLI command definitions for the `chatstore` binary.
//!
//! Uses clap derive macros for argument parsing. Commands follow a
//! noun-verb pattern (e.g., `chatstore chat create`, `chatstore message post`).

pub mod chat;
pub mod message;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Store chats and their messages.
#[derive(Parser)]
#[command(name = "chatstore", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors (`--json` results are still printed).
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (defaults to {data_dir}/config.toml).
    #[arg(long, global = true, env = "CHATSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database URL, overriding the config file.
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Styled,
    Json,
    Quiet,
}

impl Output {
    /// `--json` wins over `--quiet`: it asks for the result explicitly.
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Output::Json,
            (false, true) => Output::Quiet,
            (false, false) => Output::Styled,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to.
        #[arg(long, env = "CHATSTORE_HOST")]
        host: Option<String>,
    },

    /// Manage chats.
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },

    /// Manage messages.
    Message {
        #[command(subcommand)]
        action: MessageAction,
    },
}

#[derive(Subcommand)]
pub enum ChatAction {
    /// Create a chat.
    Create {
        /// Chat title (trimmed, 1-200 characters).
        title: String,
    },

    /// Show a chat with its most recent messages.
    Show {
        /// Chat ID.
        id: i64,

        /// Number of messages to show (0 = default of 20, max 100).
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i64,
    },

    /// Delete a chat and all of its messages.
    #[command(alias = "rm")]
    Delete {
        /// Chat ID.
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum MessageAction {
    /// Post a message into a chat.
    Post {
        /// Chat ID.
        chat_id: i64,

        /// Message text (trimmed, 1-5000 characters).
        text: String,
    },
}
