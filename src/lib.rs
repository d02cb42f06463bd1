//! launchledger: an incremental past-launch harvester
//!
//! This crate scrapes a paginated launch-listing site into a normalized CSV
//! dataset, resuming from the most recent previously persisted record on
//! each run. One run is one pass: load the prior dataset, crawl until a
//! stop condition fires, merge, persist once.

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod storage;

use thiserror::Error;

/// Main error type for launchledger operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for launchledger operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use dataset::{Dataset, LaunchRecord, RawLaunchRecord};
pub use storage::Store;
