// src/main.rs
// =============================================================================
// This is the entry point of the findlinks CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Dispatch to the crawl or outline handler
// 4. Exit with proper code (0 = success, 1 = some pages failed or the
//    crawl was interrupted, 2 = error)
// =============================================================================

mod cli;

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};
use url::Url;

use cli::{Cli, Commands};
use findlinks::crawl::{normalize_seed, CrawlReport, Crawler};
use findlinks::frontier::{traverse_concurrent, CancelToken, Completion};
use findlinks::outline::render_outline;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --quiet > --verbose > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?cli, "CLI arguments parsed");

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Runs the selected subcommand and returns the process exit code
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl {
            urls,
            concurrency,
            timeout,
            delay_ms,
            same_host,
            json,
        } => {
            let config = cli::crawl_config(timeout, delay_ms, same_host, json);
            handle_crawl(&urls, usize::from(concurrency), &config, json).await
        }
        Commands::Outline { file } => handle_outline(file.as_deref()),
    }
}

// Handles the 'crawl' subcommand
//
// Parameters:
//   raw_seeds: seed URLs as typed on the command line
//   concurrency: maximum fetches in flight per round
//   config: adapter settings
//   json: print the report as JSON at the end
async fn handle_crawl(
    raw_seeds: &[String],
    concurrency: usize,
    config: &findlinks::CrawlConfig,
    json: bool,
) -> Result<i32> {
    let seeds = parse_seeds(raw_seeds);
    if seeds.is_empty() {
        info!("No seed URLs to crawl");
    }

    let crawler = Crawler::new(config, &seeds).context("failed to set up crawler")?;

    // First Ctrl-C stops new fetches and lets in-flight pages finish;
    // a second one quits right away
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if interrupt(&on_interrupt) == Interrupt::Quit {
                warn!("Interrupted again, exiting");
                std::process::exit(130);
            }
            warn!("Interrupted, waiting for in-flight pages (Ctrl-C again to quit)");
        }
    });

    info!(seeds = seeds.len(), concurrency, "Crawl starting");
    let completion = traverse_concurrent(&crawler, seeds, concurrency, &cancel).await;
    let report = crawler.into_report();

    info!(
        visited = report.visited.len(),
        succeeded = report.succeeded(),
        failed = report.failures.len(),
        cancelled = completion == Completion::Cancelled,
        "Crawl finished"
    );

    if json {
        print_report(&report)?;
    }

    if completion == Completion::Cancelled || report.has_failures() {
        Ok(1)
    } else {
        Ok(0)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    Drain,
    Quit,
}

// The first interrupt cancels the crawl; any later one asks to quit
fn interrupt(cancel: &CancelToken) -> Interrupt {
    if cancel.is_cancelled() {
        return Interrupt::Quit;
    }
    cancel.cancel();
    Interrupt::Drain
}

// Turns command-line seeds into normalized URLs, warning about the rest
fn parse_seeds(raw_seeds: &[String]) -> Vec<Url> {
    raw_seeds
        .iter()
        .filter_map(|raw| {
            let url = normalize_seed(raw);
            if url.is_none() {
                warn!(seed = %raw, "Skipping seed that is not an http(s) URL");
            }
            url
        })
        .collect()
}

fn print_report(report: &CrawlReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    println!("{}", json_output);
    Ok(())
}

// Handles the 'outline' subcommand
fn handle_outline(file: Option<&Path>) -> Result<i32> {
    let html = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read HTML from stdin")?;
            buffer
        }
    };

    print!("{}", render_outline(&html));
    Ok(0)
}
