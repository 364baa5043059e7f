//! Operator tool for slug-redirect.
//!
//! Answers "where would this slug go?" against the live link store, using
//! the same admission and casing rules as the server.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a slug the way the server would
//! cargo run --bin linkctl -- resolve Docs --query "utm=1"
//!
//! # Show the effective configuration
//! cargo run --bin linkctl -- config
//!
//! # Check the Redis connection
//! cargo run --bin linkctl -- ping
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`REDIS_URL`, `CASE_SENSITIVE`,
//! `RESERVED_SLUGS`, ...), including a `.env` file if present.

use slug_redirect::application::services::LinkService;
use slug_redirect::config::{self, Config, mask_connection_string};
use slug_redirect::domain::repositories::LinkRepository;
use slug_redirect::infrastructure::persistence::{self, RedisLinkRepository};
use slug_redirect::utils::query::with_query;
use slug_redirect::utils::slug::normalize_path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for inspecting slug-redirect.
#[derive(Parser)]
#[command(name = "linkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a slug against the link store
    Resolve {
        /// Slug or request path (e.g. "docs" or "/docs/")
        slug: String,

        /// Query string to forward, without the leading '?'
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show the effective configuration
    Config,

    /// Check the Redis connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Resolve { slug, query } => resolve(&config, &slug, query.as_deref()).await,
        Commands::Config => {
            show_config(&config);
            Ok(())
        }
        Commands::Ping => ping(&config).await,
    }
}

/// Resolves a slug with the server's rules, bypassing the link cache.
///
/// # Output Format
///
/// ```text
/// 🔗 Resolve docs
///
///   Slug:     docs
///   Target:   https://example.com/docs?utm=1
///   Status:   301
///   Gated:    no
/// ```
async fn resolve(config: &Config, input: &str, query: Option<&str>) -> Result<()> {
    let slug = if input.starts_with('/') {
        normalize_path(input)
    } else {
        input.to_string()
    };

    println!("{} {}", "🔗 Resolve".bright_blue().bold(), slug.cyan());
    println!();

    let conn = persistence::connect(&config.redis_url).await?;
    let repository: Arc<dyn LinkRepository> = Arc::new(RedisLinkRepository::new(conn));
    let service = LinkService::new(
        repository,
        config.slug_policy()?,
        config.case_sensitive,
        Duration::ZERO,
    );

    if !service.admits(&slug) {
        println!(
            "  {}",
            "Rejected: reserved or does not match SLUG_PATTERN".yellow()
        );
        return Ok(());
    }

    let Some(link) = service
        .resolve(&slug)
        .await
        .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e))?
    else {
        println!("  {}", "No link found".yellow());
        return Ok(());
    };

    let target = match query {
        Some(q) if config.redirect_with_query && !q.is_empty() => with_query(&link.url, q),
        _ => link.url.clone(),
    };

    println!("  {:<9} {}", "Slug:".bright_white(), slug);
    println!("  {:<9} {}", "Target:".bright_white(), target.green());
    println!(
        "  {:<9} {}",
        "Status:".bright_white(),
        config.redirect_status_code
    );
    println!(
        "  {:<9} {}",
        "Gated:".bright_white(),
        if config.is_challenge_enabled() {
            "yes".yellow()
        } else {
            "no".normal()
        }
    );

    if !link.metadata.is_empty() {
        println!();
        println!("  {}", "Metadata:".bright_white());
        for (key, value) in &link.metadata {
            println!("    {:<12} {}", key.cyan(), value.to_string().bright_black());
        }
    }
    println!();

    Ok(())
}

fn show_config(config: &Config) {
    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();

    let rows = [
        ("Listen", config.listen_addr.clone()),
        ("Redis", mask_connection_string(&config.redis_url)),
        (
            "Home URL",
            config.home_url.clone().unwrap_or_else(|| "(none)".to_string()),
        ),
        ("Reserved", config.reserved_slugs.join(", ")),
        ("Pattern", config.slug_pattern.clone()),
        ("Case sensitive", config.case_sensitive.to_string()),
        ("Cache TTL", format!("{}s", config.link_cache_ttl_seconds)),
        ("Status", config.redirect_status_code.to_string()),
        ("Forward query", config.redirect_with_query.to_string()),
        (
            "Turnstile",
            if config.is_challenge_enabled() {
                "enabled".to_string()
            } else {
                "disabled".to_string()
            },
        ),
        (
            "Access log",
            format!("{:?} → {}", config.access_log_backend, config.access_log_key),
        ),
    ];

    for (name, value) in rows {
        println!("  {:<16} {}", name.bright_white(), value.cyan());
    }
    println!();
}

async fn ping(config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking Redis connection...".bright_blue());

    match persistence::connect(&config.redis_url).await {
        Ok(_) => {
            println!("{}", "✅ Redis connection OK".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{}", "❌ Redis connection failed".red().bold());
            Err(e)
        }
    }
}
