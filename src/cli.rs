// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: breadth-first crawl starting from one or more URLs
// - outline: print the element outline of an HTML document
//
// Global flags control logging (-v / -q). Logs go to stderr; stdout is kept
// for the crawl output itself so it can be piped.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use findlinks::crawl::{CrawlConfig, DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_SECS};

/// Default number of pages fetched at the same time.
pub const DEFAULT_CONCURRENCY: u8 = 8;

#[derive(Parser, Debug)]
#[command(
    name = "findlinks",
    version,
    about = "Crawl the web breadth-first, printing every page reached",
    long_about = "findlinks starts from the given URLs and follows every link it finds, \
                  visiting each page exactly once, closest pages first."
)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl starting from one or more URLs
    ///
    /// Example: findlinks crawl https://example.com --same-host -c 4
    Crawl {
        /// Seed URLs (http or https). Duplicates are ignored
        urls: Vec<String>,

        /// Maximum pages fetched concurrently (1-64)
        #[arg(
            short = 'c',
            long,
            default_value_t = DEFAULT_CONCURRENCY,
            value_parser = clap::value_parser!(u8).range(1..=64)
        )]
        concurrency: u8,

        /// Per-request timeout in seconds (at least 1)
        #[arg(
            long,
            default_value_t = DEFAULT_TIMEOUT_SECS,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        timeout: u64,

        /// Pause after each fetch in milliseconds (0 disables)
        #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
        delay_ms: u64,

        /// Only follow links on the same host as one of the seeds
        #[arg(long)]
        same_host: bool,

        /// Print a JSON report at the end instead of one URL per line
        #[arg(long)]
        json: bool,
    },

    /// Print the element outline of an HTML document
    ///
    /// Example: curl -s https://example.com | findlinks outline
    Outline {
        /// HTML file to read (stdin when omitted)
        file: Option<PathBuf>,
    },
}

impl Cli {
    // Picks the default log filter from the flags
    //
    // RUST_LOG, when set, still wins over this (see main.rs).
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

// Builds the adapter settings for the crawl subcommand
pub fn crawl_config(timeout: u64, delay_ms: u64, same_host: bool, json: bool) -> CrawlConfig {
    CrawlConfig {
        timeout: Duration::from_secs(timeout),
        delay: Duration::from_millis(delay_ms),
        same_host,
        // In JSON mode the report is the only thing on stdout
        echo: !json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::try_parse_from(["findlinks", "crawl", "https://example.com"]).unwrap();
        assert_eq!(cli.log_level(), "info");

        match cli.command {
            Commands::Crawl {
                urls,
                concurrency,
                timeout,
                delay_ms,
                same_host,
                json,
            } => {
                assert_eq!(urls, vec!["https://example.com"]);
                assert_eq!(concurrency, 8);
                assert_eq!(timeout, 10);
                assert_eq!(delay_ms, 100);
                assert!(!same_host);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_crawl_accepts_no_seeds() {
        let cli = Cli::try_parse_from(["findlinks", "crawl"]).unwrap();
        assert!(matches!(cli.command, Commands::Crawl { ref urls, .. } if urls.is_empty()));
    }

    #[test]
    fn test_concurrency_is_bounded() {
        assert!(Cli::try_parse_from(["findlinks", "crawl", "-c", "0", "https://a.test"]).is_err());
        assert!(Cli::try_parse_from(["findlinks", "crawl", "-c", "65", "https://a.test"]).is_err());
        assert!(Cli::try_parse_from(["findlinks", "crawl", "-c", "64", "https://a.test"]).is_ok());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["findlinks", "crawl", "--timeout", "0", "https://a.test"]).is_err());
        let cli =
            Cli::try_parse_from(["findlinks", "crawl", "--timeout", "1", "https://a.test"]).unwrap();
        assert!(matches!(cli.command, Commands::Crawl { timeout: 1, .. }));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["findlinks", "-vv", "outline"]).unwrap();
        assert_eq!(cli.log_level(), "trace");

        let cli = Cli::try_parse_from(["findlinks", "outline", "-v"]).unwrap();
        assert_eq!(cli.log_level(), "debug");

        let cli = Cli::try_parse_from(["findlinks", "-q", "-v", "outline"]).unwrap();
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn test_outline_file_argument() {
        let cli = Cli::try_parse_from(["findlinks", "outline", "page.html"]).unwrap();
        match cli.command {
            Commands::Outline { file } => assert_eq!(file, Some(PathBuf::from("page.html"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_json_mode_disables_echo() {
        let config = crawl_config(5, 0, true, true);
        assert!(!config.echo);
        assert!(config.same_host);
        assert!(config.delay.is_zero());
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
