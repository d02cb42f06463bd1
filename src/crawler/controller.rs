//! The incremental crawl loop
//!
//! The listing has no reliable "last page" signal, so the loop leans on two
//! independent stop conditions, checked per entry in document order:
//!
//! 1. the entry's date equals the most recent date already persisted
//!    (the dataset is up to date through that date), or
//! 2. the entry's date equals the date of the record accumulated exactly
//!    one page-length ago (the source is re-serving its final page).
//!
//! Condition 1 takes precedence. If the source keeps producing fresh pages
//! and never matches either, the loop does not terminate; the source is
//! externally operated and monotonically growing, so that risk is accepted
//! rather than guarded with an arbitrary page cap.

use crate::config::ScraperConfig;
use crate::crawler::dates::parse_date;
use crate::crawler::extract::{build_record, parse_listing};
use crate::crawler::fetcher::{build_http_client, Fetcher, RetryPolicy};
use crate::dataset::RawLaunchRecord;
use crate::Result;
use chrono::NaiveDateTime;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Records accumulated before the repeat-page guard may fire; below this
/// the crawl cannot have read a full page twice.
const LOOP_GUARD_MIN: usize = 30;

/// Drives pagination over the listing and accumulates raw records until a
/// stop condition fires
pub struct Controller<'a> {
    config: &'a ScraperConfig,
    fetcher: Fetcher,
    last_known_date: Option<NaiveDateTime>,
}

impl<'a> Controller<'a> {
    pub fn new(
        config: &'a ScraperConfig,
        last_known_date: Option<NaiveDateTime>,
    ) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let fetcher = Fetcher::new(client, RetryPolicy::from(config));
        Ok(Self {
            config,
            fetcher,
            last_known_date,
        })
    }

    /// Walks listing pages from page 1 until a stop condition fires
    ///
    /// An unavailable listing page advances to the next rather than
    /// aborting: the gap costs one page of records, not the run.
    pub async fn run(&self) -> Vec<RawLaunchRecord> {
        let page_delay = Duration::from_millis(self.config.page_delay_ms);
        let mut accumulated: Vec<RawLaunchRecord> = Vec::new();
        let mut prev_page_len = 0usize;
        let mut page: u32 = 1;
        let mut stop = false;

        while !stop {
            sleep(page_delay).await;
            info!("Scraping listing page {}", page);

            let url = self
                .config
                .listing_url
                .replace("{page}", &page.to_string());
            match self
                .fetcher
                .fetch(&url, &format!("listing page {}", page))
                .await
            {
                Some(body) => {
                    let entries = parse_listing(&body);
                    let page_len = entries.len();

                    for entry in entries {
                        let entry = match entry {
                            Ok(entry) => entry,
                            Err(e) => {
                                warn!("skipping card on page {}: {}", page, e);
                                continue;
                            }
                        };

                        let date = parse_date(&entry.date_text, &self.config.date_formats);
                        if date.is_none() {
                            warn!(
                                "no configured format matches launch date '{}' on page {}; \
                                 keeping record with a null date",
                                entry.date_text, page
                            );
                        }

                        // Already persisted through this date: drop the
                        // entry and everything after it.
                        if let (Some(date), Some(last)) = (date, self.last_known_date) {
                            if date == last {
                                info!("Reached last known launch date {}; stopping", last);
                                stop = true;
                                break;
                            }
                        }

                        if self.repeats_previous_page(&accumulated, prev_page_len, date) {
                            info!("Page {} repeats the previous page; stopping", page);
                            stop = true;
                            break;
                        }

                        let record =
                            build_record(entry, date, &self.fetcher, &self.config.detail_url)
                                .await;
                        accumulated.push(record);
                        prev_page_len = page_len;
                    }
                }
                None => warn!("listing page {} unavailable; moving on", page),
            }

            page += 1;
        }

        info!("Accumulated {} new records", accumulated.len());
        accumulated
    }

    /// The repeat-page guard: does `date` match the record accumulated
    /// exactly one page-length ago?
    ///
    /// `Option` equality deliberately lets two null dates match, as two
    /// unparseable copies of the same card would. `checked_sub` keeps a
    /// short final page (fewer appended records than the previous page's
    /// card count) from firing the guard spuriously.
    fn repeats_previous_page(
        &self,
        accumulated: &[RawLaunchRecord],
        prev_page_len: usize,
        date: Option<NaiveDateTime>,
    ) -> bool {
        if accumulated.len() < LOOP_GUARD_MIN || prev_page_len == 0 {
            return false;
        }
        match accumulated.len().checked_sub(prev_page_len) {
            Some(index) => accumulated[index].date == date,
            None => false,
        }
    }
}
