//! Dataset records, normalization, and merge
//!
//! Raw records come out of the crawl as scraped; the merge stage derives
//! the analytical columns (country, country code, numeric price, binary
//! mission status, launch year) and appends them behind the prior dataset.

mod country;
mod merge;
mod record;

pub use country::{country_code, derive_country};
pub use merge::{merge, normalize};
pub use record::{Dataset, LaunchRecord, RawLaunchRecord};
