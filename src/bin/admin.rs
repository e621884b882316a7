//! CLI administration tool for hash-shortener.
//!
//! Inspects and seeds the configured store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the short code a URL or alias hashes to
//! cargo run --bin admin -- hash "http://www.lighthouselabs.ca"
//!
//! # Shorten a URL directly against the store
//! cargo run --bin admin -- shorten "https://example.com" --custom mycustom12
//!
//! # Look up a short code
//! cargo run --bin admin -- resolve JS1bc1xPt6
//!
//! # Check store connectivity
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`REDIS_URL`, `REDIS_KEY_PREFIX`, `STORE_TIMEOUT_MS`, ...).
//! Commands other than `hash` require Redis to be configured.

use hash_shortener::application::services::{RetryPolicy, ShortenerService};
use hash_shortener::config::{self, Config};
use hash_shortener::domain::entities::ShortCode;
use hash_shortener::domain::repositories::UrlStore;
use hash_shortener::error::AppError;
use hash_shortener::infrastructure::store::RedisStore;
use hash_shortener::utils::code_generator::deterministic_hash;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing hash-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the short code an input hashes to
    Hash {
        /// URL or custom alias
        input: String,
    },

    /// Create a short code in the store
    Shorten {
        /// URL to shorten
        url: String,

        /// Custom alias (hashed into the code)
        #[arg(short, long)]
        custom: Option<String>,
    },

    /// Look up the original URL for a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hash { input } => print_hash(&input),
        Commands::Shorten { url, custom } => {
            let config = config::load_from_env()?;
            let store = connect(&config).await?;
            shorten(store, &config, &url, custom.as_deref()).await?;
        }
        Commands::Resolve { code } => {
            let config = config::load_from_env()?;
            let store = connect(&config).await?;
            resolve(store, &code).await?;
        }
        Commands::Store {
            action: StoreAction::Check,
        } => {
            let config = config::load_from_env()?;
            let store = connect(&config).await?;
            check_store(store).await?;
        }
    }

    Ok(())
}

/// Connects to the Redis store named by the configuration.
async fn connect(config: &Config) -> Result<Arc<dyn UrlStore>> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL (or REDIS_HOST) must be set")?;

    let store = RedisStore::connect(redis_url, &config.key_prefix, config.store_timeout())
        .await
        .context("Failed to connect to Redis store")?;

    Ok(Arc::new(store))
}

fn print_hash(input: &str) {
    let code = deterministic_hash(input.as_bytes());
    println!("{}", "🔑 Short code".bright_blue().bold());
    println!("  Input: {}", input.cyan());
    println!("  Code:  {}", code.as_str().bright_yellow().bold());
}

async fn shorten(
    store: Arc<dyn UrlStore>,
    config: &Config,
    url: &str,
    custom: Option<&str>,
) -> Result<()> {
    let retry = RetryPolicy {
        max_salted_attempts: config.max_salted_attempts,
        base_delay: config.retry_base_delay(),
        ..RetryPolicy::default()
    };
    let service = ShortenerService::new(store, retry);

    match service.shorten_url(url, custom).await {
        Ok(code) => {
            println!("{}", "✅ Short link created".green().bold());
            print_mapping(&code, url);
            println!(
                "  Short URL: {}",
                service.short_url(&config.base_url, &code).bright_cyan()
            );
            Ok(())
        }
        Err(AppError::AliasTaken { code }) => {
            println!(
                "{} {}",
                "❌ Alias already in use:".red().bold(),
                code.as_str().bright_yellow()
            );
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    }
}

async fn resolve(store: Arc<dyn UrlStore>, code: &str) -> Result<()> {
    let service = ShortenerService::new(store, RetryPolicy::default());

    match service.resolve_short_code(code).await {
        Ok(url) => {
            println!("{}", "🔗 Mapping found".green().bold());
            println!("  Code: {}", code.bright_yellow());
            println!("  URL:  {}", url.cyan());
        }
        Err(AppError::NotFound { .. }) => {
            println!("{} {}", "❌ No mapping for".red(), code.bright_yellow());
            if !ShortCode::is_well_formed(code) {
                println!(
                    "{}",
                    format!(
                        "   Codes are {} characters from [A-Za-z0-9_-]",
                        ShortCode::LENGTH
                    )
                    .dimmed()
                );
            }
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to resolve code: {}", e)),
    }

    Ok(())
}

async fn check_store(store: Arc<dyn UrlStore>) -> Result<()> {
    if store.health_check().await {
        println!("{}", "✅ Store reachable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("Store did not answer PING")
    }
}

fn print_mapping(code: &ShortCode, url: &str) {
    println!("  Code: {}", code.as_str().bright_yellow().bold());
    println!("  URL:  {}", url.cyan());
}
