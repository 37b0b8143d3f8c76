//! CLI administration tool for shorturl.
//!
//! Provides commands for managing API tokens and short links, viewing
//! statistics, and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API token (the first one has to be created here)
//! cargo run --bin admin -- token create --name "Production API"
//!
//! # List active tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token by ID or name
//! cargo run --bin admin -- token revoke "Production API"
//!
//! # Revoke a short link
//! cargo run --bin admin -- links revoke abc123
//!
//! # Revoke every expired link (cron-friendly)
//! cargo run --bin admin -- links sweep
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), `TOKEN_SIGNING_SECRET`, and
//! optionally `REDIS_URL` so revoked links are evicted from the cache.

use shorturl::application::services::{AuthService, UrlService};
use shorturl::config::{self, Config};
use shorturl::domain::entities::AuthToken;
use shorturl::infrastructure::persistence::{PgShortLinkRepository, PgTokenRepository};
use shorturl::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Production API", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List active tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Short link subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// Revoke a short link
    Revoke {
        /// Short key to revoke
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Revoke all links whose expiry has passed
    Sweep,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &config, &pool).await?,
        Commands::Links { action } => handle_links_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn auth_service(config: &Config, pool: &PgPool) -> AuthService {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));
    AuthService::new(repo, config.token_signing_secret.clone())
}

async fn url_service(config: &Config, pool: &PgPool) -> UrlService {
    let repo = Arc::new(PgShortLinkRepository::new(Arc::new(pool.clone())));
    let cache = server::connect_cache(config).await;
    UrlService::new(repo, cache, config.link_policy())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, config: &Config, pool: &PgPool) -> Result<()> {
    let service = auth_service(config, pool);

    match action {
        TokenAction::Create { name, yes } => create_token(&service, name, yes).await?,
        TokenAction::List => list_tokens(&service).await?,
        TokenAction::Revoke { name_or_id, yes } => revoke_token(&service, name_or_id, yes).await?,
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Security
///
/// - Only the HMAC of the token is stored in the database
/// - Raw token is displayed once and cannot be retrieved later
/// - Tokens are 48 characters (alphanumeric) for high entropy
async fn create_token(service: &AuthService, name: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Production API")
            .interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create token '{token_name}'?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let issued = service
        .create_token(&token_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("  ID:    {}", issued.record.id.to_string().bright_black());
    println!("  Name:  {}", issued.record.name.cyan());
    println!("  Token: {}", issued.token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        issued.token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists active API tokens.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  Name                           Created              Last used
///   ---------------------------------------------------------------------------
///   1   Production API                 2025-01-15 10:30     2025-01-20 08:12
///   2   Mobile App                     2025-01-16 14:20     never
/// ```
async fn list_tokens(service: &AuthService) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = service
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<20} {:<20}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for token in &tokens {
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<3} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Finds an active token by ID (numeric input) or name.
async fn find_token(service: &AuthService, name_or_id: &str) -> Result<Option<AuthToken>> {
    if let Ok(id) = name_or_id.parse::<i64>() {
        let tokens = service
            .list_tokens()
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
        return Ok(tokens.into_iter().find(|t| t.id == id));
    }

    let token = service
        .find_token_by_name(name_or_id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    Ok(token.filter(|t| t.is_active))
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Requires confirmation (default: No) unless `--yes` is given.
async fn revoke_token(service: &AuthService, name_or_id: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = find_token(service, &name_or_id)
        .await?
        .context("Active token not found")?;

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Revoke this token?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches short link commands.
async fn handle_links_action(action: LinksAction, config: &Config, pool: &PgPool) -> Result<()> {
    let service = url_service(config, pool).await;

    match action {
        LinksAction::Revoke { key, yes } => {
            println!("{}", "🔒 Revoke Short Link".bright_blue().bold());
            println!();
            println!("  Key: {}", key.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Revoke this link? This cannot be undone")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            service
                .revoke_url(&key)
                .await
                .with_context(|| format!("Failed to revoke '{key}'"))?;

            println!("{}", "✅ Link revoked".green().bold());
        }
        LinksAction::Sweep => {
            let revoked = service
                .auto_revoke_expired_urls()
                .await
                .context("Auto-revoke failed")?;

            println!(
                "{} {}",
                "✅ Expired links revoked:".green().bold(),
                revoked.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total and active number of links
/// - Total number of clicks
/// - Number of active API tokens
async fn handle_stats(config: &Config, pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await?;

    let active_links_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM short_links WHERE is_active")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM short_links")
            .fetch_one(pool)
            .await?;

    let tokens_count = auth_service(config, pool)
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?
        .len();

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Active links:  {}",
        active_links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
