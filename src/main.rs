//! Bookshelf main entry point
//!
//! This is the command-line interface for the Bookshelf catalogue crawler.

use bookshelf::config::{load_config_with_hash, Config};
use bookshelf::crawler::{crawl, CrawlRequest};
use bookshelf::output::{print_statistics, write_output, CatalogueStatistics, OutputFormat};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bookshelf: a catalogue crawler for books.toscrape.com
///
/// Bookshelf walks the catalogue's listing pages, extracts one record per
/// book and either prints the result or serves it over a paginated HTTP API.
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version)]
#[command(about = "A catalogue crawler for books.toscrape.com", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used without one)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the books API
    Serve {
        /// Address to listen on (overrides server.bind-address)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },

    /// Crawl once and print or save the records
    Scrape {
        /// Maximum number of books (overrides crawler.default-limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Crawl only this listing page
        #[arg(short, long)]
        page: Option<u32>,

        /// Output format: json or markdown
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print catalogue statistics after the crawl
        #[arg(long)]
        stats: bool,
    },

    /// Validate the configuration and show the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    match &cli.config {
        Some(path) => tracing::info!("Loading configuration from: {}", path.display()),
        None => tracing::info!("No configuration file given, using defaults"),
    }
    let (config, config_hash) = match load_config_with_hash(cli.config.as_deref()) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Command::Serve { addr } => handle_serve(&config, addr).await?,
        Command::Scrape {
            limit,
            page,
            format,
            output,
            stats,
        } => handle_scrape(&config, limit, page, format, output, stats).await?,
        Command::CheckConfig => handle_check_config(&config, &config_hash),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookshelf=info,warn"),
            1 => EnvFilter::new("bookshelf=debug,tower_http=debug,info"),
            2 => EnvFilter::new("bookshelf=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so scrape output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles `serve`: runs the HTTP API until interrupted
async fn handle_serve(
    config: &Config,
    addr: Option<SocketAddr>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = match addr {
        Some(addr) => addr,
        None => config.server.bind_address.parse()?,
    };

    bookshelf::server::serve(config, addr).await?;
    Ok(())
}

/// Handles `scrape`: one crawl, rendered to stdout or a file
async fn handle_scrape(
    config: &Config,
    limit: Option<usize>,
    page: Option<u32>,
    format: OutputFormat,
    output: Option<PathBuf>,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut request = CrawlRequest::new(limit.unwrap_or(config.crawler.default_limit));
    if let Some(page) = page {
        request = request.with_target_page(page);
    }

    let records = match crawl(config, request).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    write_output(&records, format, output.as_deref())?;

    if let Some(path) = &output {
        tracing::info!("Wrote {} records to {}", records.len(), path.display());
    }

    // stdout carries only the records
    if stats {
        print_statistics(&CatalogueStatistics::from_records(&records))?;
    }

    Ok(())
}

/// Handles `check-config`: prints the effective configuration
fn handle_check_config(config: &Config, config_hash: &str) {
    println!("=== Bookshelf Configuration ===\n");

    println!("Crawler:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!(
        "  Navigation timeout: {}ms",
        config.crawler.navigation_timeout_ms
    );
    println!("  Listing timeout: {}ms", config.crawler.listing_timeout_ms);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Default limit: {}", config.crawler.default_limit);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nServer:");
    println!("  Bind address: {}", config.server.bind_address);
    println!("  Default page size: {}", config.server.default_page_size);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
}
