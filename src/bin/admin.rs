//! CLI administration tool for linkmagic.
//!
//! Creates and inspects short links directly against the link store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin linkmagic-admin -- shorten https://example.com/long/path
//!
//! # Show where a code redirects
//! cargo run --bin linkmagic-admin -- resolve k3x9qa
//!
//! # Build a QR code image URL
//! cargo run --bin linkmagic-admin -- qr https://linkmagic.meetsid.dev/k3x9qa --size 300
//!
//! # Check database connection
//! cargo run --bin linkmagic-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Uses the same configuration as the server (see `linkmagic::config`).
//! With `STORE_BACKEND=memory` links only live as long as the command.

use linkmagic::application::services::{CodeAllocator, QrCodeService, QrRequest, Resolver};
use linkmagic::config::{self, Config, StoreBackend};
use linkmagic::domain::RedirectDecision;
use linkmagic::infrastructure::cache::NullCache;
use linkmagic::server::build_link_repository;
use linkmagic::utils::code_generator::RandomCodeGenerator;
use linkmagic::utils::short_url::compose_short_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkmagic.
#[derive(Parser)]
#[command(name = "linkmagic-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten (prompted for when omitted)
        url: Option<String>,
    },

    /// Show where a short code redirects
    Resolve {
        /// Short code
        code: String,
    },

    /// Build a QR code image URL
    Qr {
        /// Text or URL to encode
        data: String,

        /// Image edge length in pixels
        #[arg(short, long)]
        size: Option<u32>,
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

    /// Show database info and link count
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, url).await?,
        Commands::Resolve { code } => resolve(&config, &code).await?,
        Commands::Qr { data, size } => qr(&config, data, size)?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Allocates a code for `url` and prints the short link.
async fn shorten(config: &Config, url: Option<String>) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  STORE_BACKEND=memory: this link is discarded on exit".yellow()
        );
    }

    let links = build_link_repository(config).await?;
    let generator = Arc::new(RandomCodeGenerator::new(config.code_length));
    let allocator = CodeAllocator::new(links, generator, config.allocator_settings());

    let record = allocator
        .allocate(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    let short_url = compose_short_url(&config.base_url, &record.code);

    println!("{}", "✅ Short link created!".green().bold());
    println!();
    println!("  Code:      {}", record.code.bright_yellow().bold());
    println!("  Short URL: {}", short_url.cyan());
    println!("  Target:    {}", record.original_url.bright_black());
    println!();

    Ok(())
}

/// Prints the redirect decision for `code`.
async fn resolve(config: &Config, code: &str) -> Result<()> {
    let links = build_link_repository(config).await?;
    let resolver = Resolver::new(links, Arc::new(NullCache::new()));

    match resolver.resolve(code).await {
        RedirectDecision::Found(url) => {
            println!("{} {} → {}", "✅".green(), code.bright_yellow(), url.cyan());
        }
        RedirectDecision::NotFound => {
            println!("{} {} not found", "❌".red(), code.bright_yellow());
        }
        RedirectDecision::Invalid => {
            println!(
                "{} {} has a malformed record",
                "⚠️ ".yellow(),
                code.bright_yellow()
            );
        }
        RedirectDecision::StoreError(reason) => {
            anyhow::bail!("Link store error: {}", reason);
        }
    }

    Ok(())
}

/// Prints a QR code image URL for `data`.
fn qr(config: &Config, data: String, size: Option<u32>) -> Result<()> {
    let service = QrCodeService::new(&config.qr_api_url)?;

    let request = QrRequest {
        size,
        ..QrRequest::new(data)
    };

    let qr = service.generate(&request)?;

    println!("{}", qr.image_url.cyan());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    let database_url = config
        .database_url
        .as_deref()
        .context("Database commands require STORE_BACKEND=postgres and DATABASE_URL")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(&pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
