//! Command line interface
//!
//! - `serve`: HTTP server (default)
//! - `rebuild`: one-shot knowledge base rebuild
//! - `ask`: one-shot answer to a question

pub mod ask;
pub mod rebuild;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Helpdesk RAG - support chatbot over your own documents
#[derive(Parser)]
#[command(name = "helpdesk-rag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Rebuild the knowledge base index and exit
    Rebuild,

    /// Answer one question from the current index
    Ask(ask::AskArgs),
}

/// Load `.env`, configuration and logging shared by every command
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}
