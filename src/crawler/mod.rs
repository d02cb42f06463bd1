//! Crawl module: pagination, retrying fetches, and record extraction
//!
//! This module contains the incremental crawl logic:
//! - HTTP fetching with bounded exponential backoff
//! - Listing-card and detail-page extraction
//! - The page loop with its two stop conditions

mod controller;
mod dates;
mod extract;
mod fetcher;

pub use controller::Controller;
pub use dates::parse_date;
pub use extract::{parse_detail, parse_listing, DetailInfo, ExtractError, ListingEntry};
pub use fetcher::{build_http_client, Fetcher, RetryPolicy};

use crate::config::ScraperConfig;
use crate::dataset::RawLaunchRecord;
use crate::Result;
use chrono::NaiveDateTime;

/// Runs a full incremental crawl
///
/// Walks listing pages from page 1, accumulating one raw record per launch
/// card, until the crawl reaches `last_known_date` or detects that the
/// source has started repeating its final page.
///
/// # Arguments
///
/// * `config` - Crawl behavior configuration
/// * `last_known_date` - Most recent launch date already persisted, if any
///
/// # Returns
///
/// The accumulated records, newest first (the order the source lists them).
pub async fn harvest(
    config: &ScraperConfig,
    last_known_date: Option<NaiveDateTime>,
) -> Result<Vec<RawLaunchRecord>> {
    let controller = Controller::new(config, last_known_date)?;
    Ok(controller.run().await)
}
