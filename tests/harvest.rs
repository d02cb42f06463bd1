//! End-to-end crawl tests against a mock listing site
//!
//! These tests use wiremock to serve listing and detail pages and exercise
//! the full harvest cycle: pagination, stop conditions, detail resolution,
//! and the retry policy.

use chrono::{NaiveDate, NaiveDateTime};
use launchledger::config::ScraperConfig;
use launchledger::crawler::{build_http_client, harvest, Fetcher, RetryPolicy};
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base: &str) -> ScraperConfig {
    ScraperConfig {
        listing_url: format!("{}/launches/past/?page={{page}}&search=", base),
        detail_url: format!("{}/launches/details/{{id}}", base),
        user_agent: "launchledger-tests".to_string(),
        max_retries: 2,
        backoff_base_ms: 1,
        page_delay_ms: 1,
        ..ScraperConfig::default()
    }
}

fn card(organisation: &str, vehicle: &str, date: &str, location: &str, id: u32) -> String {
    format!(
        r#"<div class="mdl-cell mdl-cell--6-col">
  <style>.launch.a{id} {{ background-image: url(https://img.example.com/rocket{id}.jpg); }}</style>
  <span>{organisation}</span>
  <h5 class="header-style">{vehicle}</h5>
  <div class="mdl-card__supporting-text">
    {date}
    <br>
    {location}
  </div>
</div>"#
    )
}

fn listing(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.join("\n"))
}

const DETAIL_BODY: &str = r#"<html><body>
  <h6 class="rcorners status">Success</h6>
  <div class="mdl-cell mdl-cell--6-col-desktop mdl-cell--12-col-tablet">Status: Active</div>
  <div class="mdl-cell mdl-cell--6-col-desktop mdl-cell--12-col-tablet">Price: $62.0 million</div>
</body></html>"#;

async fn mount_listing(server: &MockServer, page: u32, body: &str) {
    Mock::given(method("GET"))
        .and(path("/launches/past/"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_details(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/launches/details/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_BODY))
        .mount(server)
        .await;
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn crawl_stops_at_last_known_date() {
    let server = MockServer::start().await;

    let page1 = listing(&[
        card(
            "SpaceX",
            "Falcon 9 Block 5 | Starlink Group 6-1",
            "2023-02-01",
            "LC-39A, Kennedy Space Center, Florida, USA",
            1,
        ),
        card(
            "CASC",
            "Long March 2D | Yaogan 37",
            "2023-01-20",
            "Jiuquan Satellite Launch Center, China",
            2,
        ),
    ]);
    let page2 = listing(&[
        card(
            "Rocket Lab",
            "Electron | Hawkeye 360",
            "2023-01-15",
            "Rocket Lab LC-1A, Mahia Peninsula, New Zealand",
            3,
        ),
        card(
            "SpaceX",
            "Falcon Heavy | USSF-67",
            "2023-01-01",
            "LC-39A, Kennedy Space Center, Florida, USA",
            4,
        ),
        card(
            "ULA",
            "Atlas V 551 | SBIRS GEO-6",
            "2022-12-29",
            "SLC-41, Cape Canaveral, Florida, USA",
            5,
        ),
    ]);

    mount_listing(&server, 1, &page1).await;
    mount_listing(&server, 2, &page2).await;
    mount_details(&server).await;

    let config = test_config(&server.uri());
    let last_known = at(2023, 1, 1);
    let records = harvest(&config, Some(last_known)).await.unwrap();

    // Page 1 entirely, plus page 2 strictly newer than the last known date.
    let vehicles: Vec<&str> = records.iter().map(|r| r.detail.as_str()).collect();
    assert_eq!(
        vehicles,
        [
            "Falcon 9 Block 5 | Starlink Group 6-1",
            "Long March 2D | Yaogan 37",
            "Electron | Hawkeye 360",
        ]
    );

    // The record matching the stop date is excluded, never appended.
    assert!(records.iter().all(|r| r.date != Some(last_known)));

    // Detail-page fields came through.
    assert_eq!(records[0].mission_status.as_deref(), Some("Success"));
    assert_eq!(records[0].rocket_status.as_deref(), Some("Active"));
    assert_eq!(records[0].price.as_deref(), Some("62.0"));
    assert_eq!(
        records[0].image_link.as_deref(),
        Some("https://img.example.com/rocket1.jpg")
    );
    assert_eq!(records[0].date, Some(at(2023, 2, 1)));
}

#[tokio::test]
async fn crawl_finds_no_new_data_when_already_current() {
    let server = MockServer::start().await;

    let page1 = listing(&[card(
        "SpaceX",
        "Falcon 9 Block 5 | Starlink Group 6-1",
        "2023-02-01",
        "LC-39A, Kennedy Space Center, Florida, USA",
        1,
    )]);
    mount_listing(&server, 1, &page1).await;
    mount_details(&server).await;

    let config = test_config(&server.uri());
    let records = harvest(&config, Some(at(2023, 2, 1))).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn crawl_stops_when_source_repeats_its_final_page() {
    let server = MockServer::start().await;

    // Three distinct pages of 12 launches; pages beyond the third serve the
    // third page's body again, the way the live source repeats its last
    // page instead of ending.
    let newest = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
    let pages: Vec<String> = (0..3)
        .map(|page_index| {
            let cards: Vec<String> = (0..12)
                .map(|card_index| {
                    let ordinal = page_index * 12 + card_index;
                    let date = newest - chrono::Duration::days(ordinal as i64);
                    card(
                        "CASC",
                        &format!("Long March 3B | Flight {}", ordinal),
                        &date.format("%Y-%m-%d").to_string(),
                        "Xichang Satellite Launch Center, China",
                        ordinal as u32,
                    )
                })
                .collect();
            listing(&cards)
        })
        .collect();

    mount_listing(&server, 1, &pages[0]).await;
    mount_listing(&server, 2, &pages[1]).await;
    mount_listing(&server, 3, &pages[2]).await;
    // Catch-all for pages >= 4: mounted last, so the specific mocks above
    // win for pages 1-3.
    Mock::given(method("GET"))
        .and(path("/launches/past/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(pages[2].as_str()))
        .mount(&server)
        .await;
    mount_details(&server).await;

    let config = test_config(&server.uri());
    let records = harvest(&config, None).await.unwrap();

    // The first entry of the repeated page matches the record one
    // page-length back, so nothing from page 4 is appended.
    assert_eq!(records.len(), 36);
    assert_eq!(records[0].detail, "Long March 3B | Flight 0");
    assert_eq!(records[35].detail, "Long March 3B | Flight 35");
}

#[tokio::test]
async fn detail_page_error_still_emits_the_record() {
    let server = MockServer::start().await;

    let page1 = listing(&[
        card(
            "SpaceX",
            "Falcon 9 Block 5 | Starlink Group 6-1",
            "2023-02-01",
            "LC-39A, Kennedy Space Center, Florida, USA",
            1,
        ),
        card(
            "CASC",
            "Long March 2D | Yaogan 37",
            "2023-01-01",
            "Jiuquan Satellite Launch Center, China",
            2,
        ),
    ]);
    mount_listing(&server, 1, &page1).await;
    // Detail pages 404 with an empty body: a completed fetch of an
    // unparseable document.
    Mock::given(method("GET"))
        .and(path_regex(r"^/launches/details/\d+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let records = harvest(&config, Some(at(2023, 1, 1))).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].organisation, "SpaceX");
    assert!(records[0].mission_status.is_none());
    assert!(records[0].rocket_status.is_none());
    assert!(records[0].price.is_none());
}

#[tokio::test]
async fn http_error_statuses_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/launches/past/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_http_client("launchledger-tests").unwrap();
    let fetcher = Fetcher::new(
        client,
        RetryPolicy {
            max_attempts: 5,
            backoff_base: Duration::from_millis(1),
        },
    );

    let body = fetcher
        .fetch(
            &format!("{}/launches/past/?page=1&search=", server.uri()),
            "listing page 1",
        )
        .await;
    assert_eq!(body.as_deref(), Some("<html>boom</html>"));

    // expect(1) is verified when the server drops
}

#[tokio::test]
async fn fetch_gives_up_after_exhausting_retries() {
    // Bind then drop a listener so the port refuses connections.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = build_http_client("launchledger-tests").unwrap();
    let fetcher = Fetcher::new(
        client,
        RetryPolicy {
            max_attempts: 3,
            backoff_base: Duration::from_millis(1),
        },
    );

    let body = fetcher
        .fetch(&format!("http://{}/", addr), "listing page 1")
        .await;
    assert!(body.is_none());
}
