//! CLI administration tool for miniurl.
//!
//! Manages mini URLs directly in PostgreSQL, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Get or create a mini URL
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Look up a key
//! cargo run --bin admin -- get aZ3kP9qx
//!
//! # Check whether a key is taken
//! cargo run --bin admin -- exists aZ3kP9qx
//!
//! # List all mini URLs
//! cargo run --bin admin -- list
//!
//! # Delete a key
//! cargo run --bin admin -- delete aZ3kP9qx
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `miniurl::config`); `DATABASE_URL` or its
//! components are required.

use miniurl::application::services::MiniUrlService;
use miniurl::config::{self, Config};
use miniurl::domain::entities::MiniUrl;
use miniurl::infrastructure::persistence::PgMiniUrlRepository;
use miniurl::server::connect_pool;
use miniurl::utils::key_generator::KeyGenerator;
use miniurl::utils::url_validator::DefaultUrlValidator;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing miniurl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get or create the mini URL for a full URL
    Shorten {
        /// The URL to shorten
        url: String,
    },

    /// Show the mini URL for a key
    Get { mini_key: String },

    /// Check whether a key is taken
    Exists { mini_key: String },

    /// List all mini URLs
    List,

    /// Delete a mini URL
    Delete {
        mini_key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;
    let pool = connect_pool(&config, &database_url).await?;

    let service = build_service(&config, pool.clone())?;

    match cli.command {
        Commands::Shorten { url } => {
            let mini_url = service.get_or_create(&url).await?;
            println!("{}", "✅ Mini URL ready".green().bold());
            print_mini_url(&mini_url);
        }
        Commands::Get { mini_key } => {
            let mini_url = service.get_by_key(&mini_key).await?;
            print_mini_url(&mini_url);
        }
        Commands::Exists { mini_key } => {
            if service.exists(&mini_key).await? {
                println!("  {} is {}", mini_key.cyan(), "taken".yellow());
            } else {
                println!("  {} is {}", mini_key.cyan(), "free".green());
            }
        }
        Commands::List => list_mini_urls(&service).await?,
        Commands::Delete { mini_key, yes } => delete_mini_url(&service, mini_key, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn build_service(config: &Config, pool: PgPool) -> Result<MiniUrlService> {
    let key_generator = KeyGenerator::new(&config.key_alphabet, config.key_length)
        .context("Invalid key generator configuration")?;

    Ok(MiniUrlService::new(
        Arc::new(PgMiniUrlRepository::new(Arc::new(pool))),
        Arc::new(DefaultUrlValidator),
        key_generator,
        config.max_key_attempts,
    ))
}

fn print_mini_url(mini_url: &MiniUrl) {
    println!();
    println!("  Key:     {}", mini_url.mini_key.bright_yellow().bold());
    println!("  URL:     {}", mini_url.full_url.cyan());
    println!("  Created: {}", format_timestamp(mini_url.created_at));
    println!("  Updated: {}", format_timestamp(mini_url.updated_at));
    println!();
}

fn format_timestamp(ts: DateTime<Utc>) -> ColoredString {
    ts.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
}

/// Lists all mini URLs.
///
/// # Output Format
///
/// ```text
/// 📋 Mini URLs
///
///   Key        Created            URL
///   ──────────────────────────────────────────────────────────
///   aZ3kP9qx   2026-01-15 10:30   https://example.com
/// ```
async fn list_mini_urls(service: &MiniUrlService) -> Result<()> {
    println!("{}", "📋 Mini URLs".bright_blue().bold());
    println!();

    let mini_urls = service.list_all().await?;

    if mini_urls.is_empty() {
        println!("{}", "  No mini URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<18} {}",
        "Key".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mini_url in &mini_urls {
        println!(
            "  {:<10} {:<18} {}",
            mini_url.mini_key.bright_yellow(),
            mini_url
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mini_url.full_url.cyan()
        );
    }

    println!();
    println!(
        "  Total: {}",
        mini_urls.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a mini URL after confirmation (default: No).
async fn delete_mini_url(service: &MiniUrlService, mini_key: String, yes: bool) -> Result<()> {
    let mini_url = service.get_by_key(&mini_key).await?;
    print_mini_url(&mini_url);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this mini URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete(&mini_key).await?;
    println!("{}", "✅ Mini URL deleted".green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mini_urls")
                .fetch_one(pool)
                .await
                .context("Failed to count mini URLs; run `admin db migrate` first?")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Mini URLs: {}", count.to_string().bright_green().bold());
        }
        DbAction::Migrate => {
            sqlx::migrate!("./migrations").run(pool).await?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
