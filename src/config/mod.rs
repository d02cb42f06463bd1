//! Configuration loading, types, and validation
//!
//! Configuration is a single TOML file with a `[scraper]` section for crawl
//! behavior and a `[storage]` section selecting the dataset backend. Every
//! key carries a default matching the live source, so an empty file is a
//! valid configuration.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Backend, Config, ScraperConfig, StorageConfig};
pub use validation::validate;
