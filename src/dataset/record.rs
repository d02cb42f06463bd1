use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One scraped launch, prior to normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawLaunchRecord {
    pub organisation: String,

    /// Vehicle / mission label
    pub detail: String,

    /// Free-text launch site; the country is derived from its tail
    pub location: String,

    /// `None` only when every configured date format failed to parse;
    /// such records are retained for later manual correction
    pub date: Option<NaiveDateTime>,

    pub image_link: Option<String>,
    pub mission_status: Option<String>,
    pub rocket_status: Option<String>,

    /// Unparsed millions-USD figure from the detail page
    pub price: Option<String>,
}

/// A normalized launch record; the dataset's CSV row shape
///
/// The serde renames fix the persisted header row, which downstream
/// consumers of the CSV depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Organisation")]
    pub organisation: String,

    #[serde(rename = "Detail")]
    pub detail: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "Date", with = "date_column")]
    pub date: Option<NaiveDateTime>,

    #[serde(rename = "Image_Link")]
    pub image_link: Option<String>,

    #[serde(rename = "Mission_Status")]
    pub mission_status: Option<String>,

    #[serde(rename = "Rocket_Status")]
    pub rocket_status: Option<String>,

    #[serde(rename = "Price")]
    pub price: Option<f64>,

    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "country_code")]
    pub country_code: String,

    #[serde(rename = "Mission_Status_Binary")]
    pub mission_status_binary: String,

    #[serde(rename = "YEAR_LAUNCH")]
    pub year: Option<i32>,
}

/// The persisted dataset: prior records first, each run's records appended
/// behind them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<LaunchRecord>,
}

impl Dataset {
    pub fn new(records: Vec<LaunchRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent launch date on record; the crawl stops when it
    /// reaches a listing entry carrying this exact date
    pub fn most_recent_date(&self) -> Option<NaiveDateTime> {
        self.records.iter().filter_map(|record| record.date).max()
    }
}

/// `Date` column codec: `%Y-%m-%d %H:%M:%S`, empty for a null date
///
/// A non-empty unparseable value is an error, so a corrupt prior dataset
/// fails the load instead of silently dropping its dates.
mod date_column {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(&value, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
