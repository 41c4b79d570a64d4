//! Configuration module for Bookshelf
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file crawls the public catalogue.
//!
//! # Example
//!
//! ```no_run
//! use bookshelf::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bookshelf.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, ServerConfig, UserAgentConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
