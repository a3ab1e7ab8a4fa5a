//! # kadrovik_scraper
//!
//! Command-line driver for the extraction pipeline.
//!
//! ## Usage
//!
//! ```sh
//! RUST_LOG=debug kadrovik_scraper list https://kadrovik.uz/
//! ```
//!
//! Logs go to stderr; results go to stdout as text or, with `--json`, as JSON.

use clap::Parser;
use futures::stream::{self, StreamExt};
use kadrovik_scraper::{ArticleSummary, Site, SiteConfig};
use serde::Serialize;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Command};

const PARALLEL_FETCHES: usize = 4;

#[derive(Debug, Serialize)]
struct DigestEntry {
    #[serde(flatten)]
    summary: ArticleSummary,
    body: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    let site = Site::new(config)?;
    info!(origin = %site.config().origin, "Site client ready");

    match args.command {
        Command::Categories => {
            let categories = site.all_categories().await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in categories.iter() {
                    println!("{}\t{}", category.name, category.url);
                }
            }
        }
        Command::List { url } => {
            let articles = site.list_articles(&url).await;
            print_summaries(&articles, args.json)?;
        }
        Command::Article { url } => {
            let body = site.fetch_article_body(&url).await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "url": url, "body": body }))?);
            } else {
                println!("{body}");
            }
        }
        Command::Digest { category, limit } => {
            let articles = site.category_articles(&category).await?;
            info!(count = articles.len(), limit, "Fetching article bodies");

            let entries: Vec<DigestEntry> = stream::iter(articles.into_iter().take(limit))
                .map(|summary| {
                    let site = &site;
                    async move {
                        let body = site.fetch_article_body(&summary.url).await;
                        DigestEntry { summary, body }
                    }
                })
                .buffered(PARALLEL_FETCHES)
                .collect()
                .await;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{}\n{}\n", entry.summary.url, entry.body);
                }
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(millis = elapsed.as_millis() as u64, "Execution complete");
    Ok(())
}

fn print_summaries(articles: &[ArticleSummary], json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(articles)?);
    } else if articles.is_empty() {
        println!("Статьи не найдены");
    } else {
        for (i, article) in articles.iter().enumerate() {
            println!("{}. {}\n   {}", i + 1, article.title, article.url);
        }
    }
    Ok(())
}
