//! `shorturl` server binary.

use anyhow::Result;
use clap::{Parser, Subcommand};

use shorturl::{config, server, telemetry};

/// URL shortener with passkey-protected, expiring short links.
#[derive(Parser)]
#[command(name = "shorturl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(long, global = true)]
    listen: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations and serve HTTP (default)
    Serve,

    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
        config.validate()?;
    }

    telemetry::init(&config.log_level, &config.log_format)?;
    config.print_summary();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::run(config).await,
        Command::Migrate => {
            let pool = server::connect_pool(&config).await?;
            server::run_migrations(&pool).await
        }
    }
}
