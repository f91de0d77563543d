use clap::Parser;
use helpdesk_rag::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run().await,
        Command::Rebuild => cli::rebuild::run().await,
        Command::Ask(args) => cli::ask::run(args).await,
    }
}
