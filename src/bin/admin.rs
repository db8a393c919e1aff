//! CLI administration tool for shorturl.
//!
//! Shortens and resolves URLs, shows statistics and runs database checks
//! directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten https://www.example.com
//!
//! # Look up the URL behind an id
//! cargo run --bin admin -- resolve 1
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
//! Same as the server; see [`shorturl::config`]. Only the database and
//! host verification settings are used here.

use shorturl::application::services::ShortenerService;
use shorturl::config::{self, Config};
use shorturl::domain::repositories::UrlRepository;
use shorturl::domain::resolver::HostResolver;
use shorturl::infrastructure::dns::{PermissiveResolver, SystemResolver};
use shorturl::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
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
    /// Shorten a URL
    Shorten {
        /// URL to shorten (prompted for when omitted)
        url: Option<String>,
    },

    /// Show the URL stored under a short id
    Resolve {
        /// Short id, e.g. 1
        id: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
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
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, &pool, url).await?,
        Commands::Resolve { id } => resolve(&config, &pool, &id).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn build_shortener(config: &Config, pool: &PgPool) -> ShortenerService<PgUrlRepository> {
    let resolver: Arc<dyn HostResolver> = if config.verify_hosts {
        Arc::new(SystemResolver::new(config.dns_timeout()))
    } else {
        Arc::new(PermissiveResolver)
    };

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    ShortenerService::new(repository, resolver)
        .with_allocation_attempts(config.allocation_attempts)
}

/// Shortens a URL, prompting for it when not given on the command line.
async fn shorten(config: &Config, pool: &PgPool, url: Option<String>) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let shortener = build_shortener(config, pool);

    match shortener.shorten(&url).await {
        Ok(mapping) => {
            println!("  Original: {}", mapping.original_url.cyan());
            println!(
                "  Short id: {}",
                mapping.short_id.to_string().bright_yellow().bold()
            );
            println!(
                "  Created:  {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!();
        }
        Err(e) if e.is_client_error() => {
            println!("{} {}", "❌ Rejected:".red().bold(), e);
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    }

    Ok(())
}

/// Prints the URL stored under `id`.
async fn resolve(config: &Config, pool: &PgPool, id: &str) -> Result<()> {
    let shortener = build_shortener(config, pool);

    match shortener.resolve(id).await {
        Ok(url) => println!("  {} → {}", id.bright_yellow(), url.cyan()),
        Err(e) if e.is_client_error() => {
            println!("{} {}", "⚠️ ".yellow(), e.public_message().yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to resolve id: {}", e)),
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of stored mappings
/// - Highest allocated id
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let mappings_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    let max_id = repo
        .find_max_short_id()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read highest id: {}", e))?;

    println!(
        "  Mappings:    {}",
        mappings_count.to_string().bright_green().bold()
    );
    println!(
        "  Highest id:  {}",
        max_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
            .bright_green()
            .bold()
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

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
