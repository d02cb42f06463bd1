//! Listing-card and detail-page extraction
//!
//! A listing card carries the organisation, vehicle, date and location
//! plus a `<style>` element whose text smuggles in two useful values: the
//! card's background-image URL and the numeric id of its detail page.
//! The detail page adds rocket status, price and mission status.

use crate::crawler::fetcher::Fetcher;
use crate::dataset::RawLaunchRecord;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::warn;

/// Placeholder art the site serves when a launch has no image of its own;
/// treated as "no image".
const PLACEHOLDER_IMAGE: &str =
    "https://storage.googleapis.com/nextspaceflight/media/rockets/default.jpg";

static CARD: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mdl-cell.mdl-cell--6-col").unwrap());
static ORGANISATION: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static VEHICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h5.header-style").unwrap());
static SUPPORTING_TEXT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mdl-card__supporting-text").unwrap());
static CARD_STYLE: Lazy<Selector> = Lazy::new(|| Selector::parse("style").unwrap());
static DETAIL_BLOCK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.mdl-cell.mdl-cell--6-col-desktop.mdl-cell--12-col-tablet").unwrap()
});
static MISSION_STATUS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h6.rcorners.status").unwrap());

static IMAGE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"url\((.*?)\)").unwrap());
static LAUNCH_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.launch\.a(\d+)").unwrap());
static ROCKET_STATUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Status:\s*(\w+)").unwrap());
static PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Price:\s*\$([\d.]+) million").unwrap());

/// A listing card is missing markup the record needs
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("listing card is missing its {0}")]
    MissingField(&'static str),
}

/// One listing card, before the detail page has been consulted
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub organisation: String,
    pub vehicle: String,
    pub date_text: String,
    pub location: String,
    pub image_link: Option<String>,
    pub launch_id: Option<String>,
}

/// Extended fields scraped from a launch detail page
#[derive(Debug, Clone, Default)]
pub struct DetailInfo {
    pub mission_status: Option<String>,
    pub rocket_status: Option<String>,
    pub price: Option<String>,
}

/// Parses every launch card on a listing page, in document order
///
/// Malformed cards come back as errors so the caller can log and skip them
/// without losing the rest of the page.
pub fn parse_listing(html: &str) -> Vec<Result<ListingEntry, ExtractError>> {
    let document = Html::parse_document(html);
    document.select(&CARD).map(parse_card).collect()
}

fn parse_card(card: ElementRef) -> Result<ListingEntry, ExtractError> {
    let organisation =
        first_text(card, &ORGANISATION).ok_or(ExtractError::MissingField("organisation"))?;
    let vehicle = first_text(card, &VEHICLE).ok_or(ExtractError::MissingField("vehicle name"))?;

    // The supporting-text block holds the date on its first non-blank line
    // and the location on its last.
    let supporting = card
        .select(&SUPPORTING_TEXT)
        .next()
        .ok_or(ExtractError::MissingField("date and location block"))?;
    let lines: Vec<String> = supporting
        .text()
        .collect::<String>()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    let date_text = lines
        .first()
        .ok_or(ExtractError::MissingField("date line"))?
        .clone();
    let location = lines
        .last()
        .ok_or(ExtractError::MissingField("location line"))?
        .clone();

    let style = card
        .select(&CARD_STYLE)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default();
    let image_link = IMAGE_URL
        .captures(&style)
        .map(|captures| captures[1].to_string())
        .filter(|link| link != PLACEHOLDER_IMAGE);
    let launch_id = LAUNCH_ID
        .captures(&style)
        .map(|captures| captures[1].to_string());

    Ok(ListingEntry {
        organisation,
        vehicle,
        date_text,
        location,
        image_link,
        launch_id,
    })
}

fn first_text(card: ElementRef, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Scans a detail page for the status heading and the Status/Price blocks
///
/// When several blocks match a pattern the last one wins.
pub fn parse_detail(html: &str) -> DetailInfo {
    let document = Html::parse_document(html);

    let mission_status = document
        .select(&MISSION_STATUS)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty());

    let mut rocket_status = None;
    let mut price = None;
    for block in document.select(&DETAIL_BLOCK) {
        let text = block.text().collect::<String>();
        if let Some(captures) = ROCKET_STATUS.captures(&text) {
            rocket_status = Some(captures[1].to_string());
        }
        if let Some(captures) = PRICE.captures(&text) {
            price = Some(captures[1].to_string());
        }
    }

    DetailInfo {
        mission_status,
        rocket_status,
        price,
    }
}

/// Completes a listing entry into a raw record, fetching the detail page
/// when the card carried a launch id
///
/// An unavailable detail page leaves the three detail fields empty; the
/// record is still emitted.
pub async fn build_record(
    entry: ListingEntry,
    date: Option<NaiveDateTime>,
    fetcher: &Fetcher,
    detail_url: &str,
) -> RawLaunchRecord {
    let detail = match &entry.launch_id {
        Some(id) => {
            let url = detail_url.replace("{id}", id);
            match fetcher.fetch(&url, &format!("launch detail {}", id)).await {
                Some(body) => parse_detail(&body),
                None => {
                    warn!("detail page for launch {} unavailable", id);
                    DetailInfo::default()
                }
            }
        }
        None => {
            warn!(
                "card for {} has no detail-page id in its style metadata",
                entry.organisation
            );
            DetailInfo::default()
        }
    };

    RawLaunchRecord {
        organisation: entry.organisation,
        detail: entry.vehicle,
        location: entry.location,
        date,
        image_link: entry.image_link,
        mission_status: detail.mission_status,
        rocket_status: detail.rocket_status,
        price: detail.price,
    }
}
