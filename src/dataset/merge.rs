//! Merge of freshly scraped records into the prior dataset

use crate::dataset::country::{country_code, derive_country};
use crate::dataset::record::{Dataset, LaunchRecord, RawLaunchRecord};
use chrono::Datelike;

/// Normalizes one raw record into its dataset row
pub fn normalize(raw: RawLaunchRecord) -> LaunchRecord {
    let country = derive_country(&raw.location);
    let country_code = country_code(&country);
    let price = raw
        .price
        .as_deref()
        .and_then(|price| price.trim().parse::<f64>().ok());
    let mission_status_binary = if raw.mission_status.as_deref() == Some("Success") {
        "Success".to_string()
    } else {
        "Failure".to_string()
    };
    let year = raw.date.map(|date| date.year());

    LaunchRecord {
        organisation: raw.organisation,
        detail: raw.detail,
        location: raw.location,
        date: raw.date,
        image_link: raw.image_link,
        mission_status: raw.mission_status,
        rocket_status: raw.rocket_status,
        price,
        country,
        country_code,
        mission_status_binary,
        year,
    }
}

/// Appends `incoming`, normalized, behind the untouched `existing` records
/// and returns the combined dataset
///
/// Existing records pass through unchanged — they were normalized when they
/// were first merged. There is no dedup pass: overlap prevention is the
/// crawl's stop conditions. The result is a new dataset so a failed save
/// leaves the caller's prior state intact.
pub fn merge(existing: &Dataset, incoming: Vec<RawLaunchRecord>) -> Dataset {
    let mut records = existing.records.clone();
    records.extend(incoming.into_iter().map(normalize));
    Dataset::new(records)
}
