//! CLI administration tool for shorturl.
//!
//! Works directly against the PostgreSQL store, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Show where a short url points
//! cargo run --bin admin -- lookup 42
//!
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten https://www.freecodecamp.org
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_URL` (required): PostgreSQL connection string
//! - `ID_STRATEGY` (optional): `random` or `sequential`, as for the server

use shorturl::application::services::url_validator::DEFAULT_RESOLVE_TIMEOUT;
use shorturl::application::services::{
    AllocationStrategy, IdAllocator, MappingService, UrlValidator,
};
use shorturl::error::AppError;
use shorturl::infrastructure::dns::SystemResolver;
use shorturl::infrastructure::persistence::{
    PgMappingRepository, PoolSettings, connect_pool, run_migrations,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

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
    /// Show statistics
    Stats,

    /// Show the URL stored under a short url
    Lookup {
        /// Short url (positive integer)
        short_url: String,
    },

    /// Validate and shorten a URL
    Shorten {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Hostname resolution timeout in milliseconds
        #[arg(long, default_value_t = DEFAULT_RESOLVE_TIMEOUT.as_millis() as u64)]
        timeout_ms: u64,

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

/// Database operation subcommands.
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

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("DB_URL"))
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(&database_url, PoolSettings::default())
        .context("Invalid DATABASE_URL")?;

    match cli.command {
        Commands::Stats => handle_stats(pool).await?,
        Commands::Lookup { short_url } => handle_lookup(pool, &short_url).await?,
        Commands::Shorten {
            url,
            timeout_ms,
            yes,
        } => handle_shorten(pool, url, Duration::from_millis(timeout_ms), yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn mapping_service(pool: PgPool) -> Result<MappingService> {
    let strategy = match std::env::var("ID_STRATEGY") {
        Ok(raw) => raw
            .parse::<AllocationStrategy>()
            .map_err(anyhow::Error::msg)?,
        Err(_) => AllocationStrategy::default(),
    };

    Ok(MappingService::new(
        Arc::new(PgMappingRepository::new(Arc::new(pool))),
        IdAllocator::new(strategy),
    ))
}

/// Displays the number of stored mappings and the highest short url.
async fn handle_stats(pool: PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let service = mapping_service(pool)?;
    let count = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;
    let max = service
        .max_short_id()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read highest short url: {}", e))?;

    println!(
        "  Short urls:         {}",
        count.to_string().bright_green().bold()
    );
    println!(
        "  Highest short url:  {}",
        max.map_or_else(|| "-".to_string(), |id| id.to_string())
            .bright_green()
            .bold()
    );
    println!();

    Ok(())
}

async fn handle_lookup(pool: PgPool, short_url: &str) -> Result<()> {
    let service = mapping_service(pool)?;

    match service.resolve_segment(short_url).await {
        Ok(mapping) => {
            println!(
                "  {} -> {}",
                mapping.short_id.to_string().bright_white().bold(),
                mapping.original_url.cyan()
            );
        }
        Err(AppError::NotFound) => {
            println!("{}", format!("  No short url {short_url}").yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }

    Ok(())
}

/// Validates and shortens a URL with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Run the same validation as the HTTP endpoint, including DNS
/// 3. Confirm (unless `--yes`)
/// 4. Find or create the mapping
async fn handle_shorten(
    pool: PgPool,
    url: Option<String>,
    timeout: Duration,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Shorten URL".bright_blue().bold());
    println!();

    let input = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let validator = UrlValidator::new(Arc::new(SystemResolver::new()), timeout);
    let original_url = match validator.check(&input).await {
        Ok(url) => url,
        Err(reason) => {
            println!("{}", format!("  Invalid URL: {reason}").red());
            return Ok(());
        }
    };

    println!("  URL: {}", original_url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Shorten this URL?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let mapping = mapping_service(pool)?
        .find_or_create(&original_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to store mapping: {}", e))?;

    println!();
    println!(
        "{} short url {}",
        "Done:".green().bold(),
        mapping.short_id.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            run_migrations(pool).await?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
