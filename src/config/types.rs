use serde::Deserialize;

/// Main configuration structure for launchledger
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Listing page URL template; `{page}` is replaced with the 1-based
    /// page index
    #[serde(rename = "listing-url", default = "default_listing_url")]
    pub listing_url: String,

    /// Detail page URL template; `{id}` is replaced with the launch id
    /// taken from the listing card
    #[serde(rename = "detail-url", default = "default_detail_url")]
    pub detail_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total fetch attempts before a URL is declared unavailable
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff interval; doubles after every failed attempt
    #[serde(rename = "backoff-base-ms", default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Courtesy delay before each listing page request
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Date formats tried in order against listing date strings
    #[serde(rename = "date-formats", default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            detail_url: default_detail_url(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            backoff_base_ms: default_backoff_base_ms(),
            page_delay_ms: default_page_delay_ms(),
            date_formats: default_date_formats(),
        }
    }
}

/// Dataset storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which backend holds the dataset blob
    #[serde(default)]
    pub backend: Backend,

    /// Local backend: directory the dataset file lives in
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,

    /// Dataset file name (local path component or object key)
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Remote backends: bucket name
    #[serde(default)]
    pub bucket: Option<String>,

    /// Remote backends: endpoint override, for tests and S3-compatible
    /// gateways
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Remote backends: name of an environment variable holding a bearer
    /// token
    #[serde(rename = "token-env", default)]
    pub token_env: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            data_dir: default_data_dir(),
            filename: default_filename(),
            bucket: None,
            endpoint: None,
            token_env: None,
        }
    }
}

/// Storage backend selector, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Gcs,
    S3,
}

fn default_listing_url() -> String {
    "https://nextspaceflight.com/launches/past/?page={page}&search=".to_string()
}

fn default_detail_url() -> String {
    "https://nextspaceflight.com/launches/details/{id}".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:108.0) Gecko/20100101 Firefox/108.0".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_backoff_base_ms() -> u64 {
    2000
}

fn default_page_delay_ms() -> u64 {
    2000
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_filename() -> String {
    "nsf_past_launches.csv".to_string()
}

fn default_date_formats() -> Vec<String> {
    [
        "%a %b %d, %Y",
        "%a %b %d, %Y %H:%M UTC",
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
    ]
    .iter()
    .map(|format| format.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_live_source_values() {
        let config = Config::default();
        assert!(config.scraper.listing_url.contains("{page}"));
        assert!(config.scraper.detail_url.contains("{id}"));
        assert_eq!(config.scraper.max_retries, 5);
        assert_eq!(config.scraper.date_formats.len(), 4);
        assert_eq!(config.storage.backend, Backend::Local);
        assert_eq!(config.storage.data_dir, "data");
    }
}
