//! Command-line interface definitions.
//!
//! The binary is a thin developer driver over [`kadrovik_scraper::Site`]:
//! each subcommand runs one extraction stage and prints the result.

use clap::{Parser, Subcommand};

/// Extract categories, listings and articles from kadrovik.uz.
///
/// # Examples
///
/// ```sh
/// kadrovik_scraper categories
/// kadrovik_scraper list https://kadrovik.uz/publish/group6566_6
/// kadrovik_scraper article https://kadrovik.uz/publish/doc/123
/// kadrovik_scraper --json digest "Отпуска и отгулы" --limit 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional YAML file overriding the built-in site configuration
    #[arg(short, long, env = "KADROVIK_CONFIG", global = true)]
    pub config: Option<String>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discover categories on the landing page (falls back to the built-in set)
    Categories,

    /// List up to 10 articles from a listing page
    List {
        /// Category or landing page URL
        url: String,
    },

    /// Print the text of one article
    Article {
        url: String,
    },

    /// List a category by name and print the text of its first articles
    Digest {
        /// Category name as printed by `categories`
        category: String,

        /// Number of articles to fetch
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_list() {
        let cli = Cli::parse_from([
            "kadrovik_scraper",
            "list",
            "https://kadrovik.uz/publish/group6566_6",
        ]);
        assert_eq!(
            cli.command,
            Command::List {
                url: "https://kadrovik.uz/publish/group6566_6".to_string()
            }
        );
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_digest_defaults() {
        let cli = Cli::parse_from(["kadrovik_scraper", "digest", "Справочники"]);
        assert_eq!(
            cli.command,
            Command::Digest {
                category: "Справочники".to_string(),
                limit: 5
            }
        );
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "kadrovik_scraper",
            "categories",
            "--json",
            "-c",
            "/tmp/site.yaml",
        ]);
        assert_eq!(cli.command, Command::Categories);
        assert!(cli.json);
        assert_eq!(cli.config.as_deref(), Some("/tmp/site.yaml"));
    }
}
