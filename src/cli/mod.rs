pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::config;

#[derive(Parser)]
#[command(name = "forumhub")]
#[command(about = "ForumHub API - forum topics behind JWT authentication")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Use in-memory stores seeded with admin/123456 instead of PostgreSQL")]
        memory: bool,
    },

    #[command(about = "Apply database migrations")]
    Migrate,

    #[command(about = "User account provisioning")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config();
    tracing::info!("Starting ForumHub in {:?} mode", config.environment);

    match cli.command.unwrap_or(Commands::Serve { memory: false }) {
        Commands::Serve { memory } => commands::serve::handle(config, memory).await,
        Commands::Migrate => commands::migrate::handle(config).await,
        Commands::User { cmd } => commands::user::handle(cmd, config).await,
    }
}
