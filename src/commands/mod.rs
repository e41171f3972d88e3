pub mod init;
pub mod migrations;
pub mod serve;

use crate::libs::config::Config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "tickoff=info,tower_http=info";

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Write the configuration file")]
    Init(init::InitArgs),
    #[command(about = "Run pending migrations and start the web server")]
    Serve(serve::ServeArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> anyhow::Result<()> {
        let cli = Self::parse();
        init_tracing();

        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Flags that override the loaded configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Address to listen on
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,
    /// Path to the SQLite database file
    #[arg(long)]
    pub database: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path = Some(database.clone());
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
