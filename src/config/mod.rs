//! Configuration module for funnelweb
//!
//! This module handles loading, parsing, and validating the optional TOML
//! tuning file. Everything in it has a sensible default; crawl and search
//! work with no file at all.
//!
//! # Example
//!
//! ```no_run
//! use funnelweb::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("funnelweb.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, TextConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default};
